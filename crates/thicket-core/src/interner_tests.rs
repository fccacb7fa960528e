use crate::Interner;

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("lhs");
    let b = interner.intern("lhs");
    let c = interner.intern("rhs");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
}

#[test]
fn resolve_roundtrip() {
    let mut interner = Interner::new();
    let sym = interner.intern("is_small");
    assert_eq!(interner.resolve(sym), "is_small");
    assert_eq!(interner.get("is_small"), Some(sym));
    assert_eq!(interner.get("missing"), None);
}

#[test]
fn iter_in_insertion_order() {
    let mut interner = Interner::new();
    interner.intern("b");
    interner.intern("a");

    let names: Vec<_> = interner.iter().map(|(_, s)| s).collect();
    assert_eq!(names, ["b", "a"]);
}

#[test]
fn try_resolve_out_of_range() {
    let interner = Interner::new();
    let mut other = Interner::new();
    let sym = other.intern("x");
    assert!(interner.try_resolve(sym).is_none());
    assert!(interner.is_empty());
}
