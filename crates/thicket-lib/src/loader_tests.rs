use std::fs;
use std::path::Path;

use indoc::indoc;

use crate::loader::{default_output_path, read_source, resolve_path};
use crate::vm::ParseOptions;
use crate::{Error, Namespace, compile_file, load};

fn grammar(name: &str, terminal: &str) -> String {
    format!("grammar {name}\n  rule a\n    '{terminal}'\n  end\nend\n")
}

#[test]
fn load_by_bare_name_tries_extensions_in_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("g.tkt"), grammar("Short", "s")).unwrap();

    let mut ns = Namespace::new();
    let program = load(dir.path().join("g"), &mut ns).unwrap();
    assert_eq!(program.name(), "Short");

    fs::write(dir.path().join("g.thicket"), grammar("Long", "l")).unwrap();
    let program = load(dir.path().join("g"), &mut ns).unwrap();
    assert_eq!(program.name(), "Long");

    assert!(ns.contains("ShortParser"));
    assert!(ns.contains("Long::Parser"));
}

#[test]
fn existing_path_is_used_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grammar.txt");
    fs::write(&path, grammar("Plain", "p")).unwrap();
    fs::write(dir.path().join("grammar.txt.thicket"), grammar("Other", "o")).unwrap();

    assert_eq!(resolve_path(&path).unwrap(), path);

    let mut ns = Namespace::new();
    load(&path, &mut ns).unwrap();
    let mut parser = ns.parser("PlainParser").unwrap();
    assert!(parser.parse("p", ParseOptions::new()).unwrap().is_some());
}

#[test]
fn missing_grammar_lists_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("nope");

    let err = load(&base, &mut Namespace::new()).unwrap_err();
    let Error::GrammarNotFound { candidates } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(
        candidates,
        &vec![
            base.clone(),
            dir.path().join("nope.thicket"),
            dir.path().join("nope.tkt"),
        ]
    );
    assert!(err.to_string().starts_with("grammar not found (tried `"));
}

#[test]
fn invalid_grammar_file_reports_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.thicket");
    fs::write(&path, "grammar Bad rule a 'x' ) end end").unwrap();

    let mut ns = Namespace::new();
    let err = load(&path, &mut ns).unwrap_err();
    assert!(err.diagnostics().is_some_and(|d| d.has_errors()));
    assert!(ns.is_empty());
}

#[test]
fn read_error_keeps_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.thicket");

    let err = read_source(&path).unwrap_err();
    assert!(matches!(err, Error::Io { path: ref p, .. } if p == &path));
}

#[test]
fn compile_file_writes_next_to_grammar() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("arith.thicket");
    fs::write(
        &src,
        indoc! {"
            # coding: UTF-8
            grammar Arith
              rule digit
                [0-9]
              end
            end
        "},
    )
    .unwrap();

    let dest = compile_file(&src, None).unwrap();
    assert_eq!(dest, dir.path().join("arith.rs"));

    let out = fs::read_to_string(&dest).unwrap();
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("# coding: UTF-8"));
    assert_eq!(
        lines.next(),
        Some("// @generated by thicket from grammar `Arith`. Do not edit.")
    );
    assert!(out.contains("pub struct ArithParser(thicket::vm::CompiledParser);"));
}

#[test]
fn compile_file_to_explicit_destination() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("g.tkt");
    let dest = dir.path().join("out").with_extension("generated");
    fs::write(&src, grammar("G", "g")).unwrap();

    assert_eq!(compile_file(&src, Some(dest.as_path())).unwrap(), dest);
    assert!(!dir.path().join("g.rs").exists());
    assert!(
        fs::read_to_string(&dest)
            .unwrap()
            .starts_with("// @generated by thicket")
    );
}

#[test]
fn output_path_defaults() {
    let cases = [
        ("a/g.thicket", "a/g.rs"),
        ("a/g.tkt", "a/g.rs"),
        ("a/g.peg", "a/g.peg.rs"),
        ("a/g", "a/g.rs"),
    ];
    for (src, expected) in cases {
        assert_eq!(default_output_path(Path::new(src)), Path::new(expected));
    }
}
