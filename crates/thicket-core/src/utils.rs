//! Identifier casing for generated Rust code.

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '.')
}

/// Join `_`, `-` or `.` separated words into PascalCase.
///
/// Names that are already PascalCase pass through untouched; all-caps words
/// are lowered after their first letter.
///
/// ```
/// use thicket_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("foo_bar"), "FooBar");
/// assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
/// assert_eq!(to_pascal_case("FooBar"), "FooBar");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let already_pascal = s.starts_with(|c: char| c.is_ascii_uppercase())
        && s.contains(|c: char| c.is_ascii_lowercase())
        && !s.contains(is_separator);
    if already_pascal {
        return s.to_string();
    }

    s.split(is_separator)
        .filter(|word| !word.is_empty())
        .flat_map(|word| {
            let mut chars = word.chars();
            let head = chars.next().map(|c| c.to_ascii_uppercase());
            head.into_iter().chain(chars.map(|c| c.to_ascii_lowercase()))
        })
        .collect()
}

/// ```
/// use thicket_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FooBar"), "foo_bar");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }
        if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Strict and reserved words, 2021 edition and later.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Make `s` usable as a Rust item name: keywords become raw identifiers,
/// and the four that cannot be raw get a trailing underscore.
pub fn to_rust_ident(s: &str) -> String {
    match s {
        "self" | "super" | "crate" | "Self" => format!("{s}_"),
        _ if KEYWORDS.contains(&s) => format!("r#{s}"),
        _ => s.to_string(),
    }
}
