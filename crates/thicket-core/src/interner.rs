//! Label names and predicate keys, stored once per program.
//!
//! Compiled expressions carry a [`Symbol`] instead of the text, so label
//! lookups at parse time compare integers.

use std::collections::HashMap;

/// Index into an [`Interner`]. Symbols order by first interning.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct Interner {
    strings: Vec<String>,
    index: HashMap<String, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(sym) = self.get(s) {
            return sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        self.index.insert(s.to_owned(), sym);
        self.strings.push(s.to_owned());
        sym
    }

    /// Symbol for `s`, if it was interned already.
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.index.get(s).copied()
    }

    /// Panics on a symbol from another interner; see [`Interner::try_resolve`].
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.as_usize()]
    }

    #[inline]
    pub fn try_resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.as_usize()).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Symbols with their text, in interning order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        (0u32..)
            .zip(&self.strings)
            .map(|(i, s)| (Symbol(i), s.as_str()))
    }
}
