//! Staged facade over the compilation pipeline: parse, then analyze.

use thicket_ir::Grammar;

use crate::analyze::{self, SymbolTable};
use crate::parser::{self, ParseResult, Root};
use crate::{Diagnostics, Error, Result};

pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
pub const DEFAULT_RECURSION_FUEL: u32 = 4096;

pub struct GrammarBuilder<'s> {
    src: &'s str,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl<'s> GrammarBuilder<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }

    /// `None` disables the limit.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// `None` disables the limit.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    pub fn parse(self) -> Result<GrammarParsed<'s>> {
        let ParseResult {
            root,
            diagnostics,
            exec_fuel_consumed,
        } = parser::parse(self.src, self.exec_fuel, self.recursion_fuel)?;

        Ok(GrammarParsed {
            src: self.src,
            diag: diagnostics,
            root,
            exec_fuel_consumed,
        })
    }
}

pub struct GrammarParsed<'s> {
    src: &'s str,
    diag: Diagnostics,
    root: Root,
    pub exec_fuel_consumed: u32,
}

impl<'s> GrammarParsed<'s> {
    pub fn source(&self) -> &'s str {
        self.src
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn is_valid(&self) -> bool {
        !self.diag.has_errors()
    }

    /// Syntax errors stop the pipeline; analysis runs only on a clean tree.
    pub fn analyze(mut self) -> Result<GrammarAnalyzed<'s>> {
        if self.diag.has_errors() {
            return Err(Error::GrammarSyntaxError(self.diag.filtered()));
        }
        let (symbols, grammar) = analyze::analyze(&self.root, &mut self.diag);
        Ok(GrammarAnalyzed {
            parsed: self,
            symbols,
            grammar,
        })
    }
}

pub struct GrammarAnalyzed<'s> {
    parsed: GrammarParsed<'s>,
    symbols: SymbolTable,
    grammar: Grammar,
}

impl<'s> GrammarAnalyzed<'s> {
    pub fn source(&self) -> &'s str {
        self.parsed.src
    }

    pub fn root(&self) -> &Root {
        &self.parsed.root
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Warnings included.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.parsed.diag
    }

    pub fn is_valid(&self) -> bool {
        !self.parsed.diag.has_errors()
    }

    pub fn into_grammar(self) -> Result<Grammar> {
        if self.parsed.diag.has_errors() {
            return Err(Error::GrammarAnalyzeError(self.parsed.diag.filtered()));
        }
        Ok(self.grammar)
    }
}

/// Parse and analyze `src` with default fuel limits.
pub fn compile_grammar(src: &str) -> Result<Grammar> {
    GrammarBuilder::new(src).parse()?.analyze()?.into_grammar()
}
