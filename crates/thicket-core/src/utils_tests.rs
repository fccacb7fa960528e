use crate::utils::{to_pascal_case, to_rust_ident, to_snake_case};

#[test]
fn pascal_case_from_snake() {
    assert_eq!(to_pascal_case("foo_bar"), "FooBar");
    assert_eq!(to_pascal_case("foo"), "Foo");
    assert_eq!(to_pascal_case("_foo"), "Foo");
}

#[test]
fn pascal_case_idempotent() {
    assert_eq!(to_pascal_case("FooBar"), "FooBar");
    assert_eq!(to_pascal_case("TwoRules"), "TwoRules");
}

#[test]
fn pascal_case_normalizes_shouting() {
    assert_eq!(to_pascal_case("FOO_BAR"), "FooBar");
}

#[test]
fn snake_case_from_pascal() {
    assert_eq!(to_snake_case("FooBar"), "foo_bar");
    assert_eq!(to_snake_case("SequenceOfTerminals"), "sequence_of_terminals");
    assert_eq!(to_snake_case("Test"), "test");
}

#[test]
fn snake_case_keeps_existing_underscores() {
    assert_eq!(to_snake_case("Bad_Parenting"), "bad_parenting");
}

#[test]
fn rust_ident_escapes_keywords() {
    assert_eq!(to_rust_ident("type"), "r#type");
    assert_eq!(to_rust_ident("do"), "r#do");
    assert_eq!(to_rust_ident("self"), "self_");
    assert_eq!(to_rust_ident("additive"), "additive");
}
