//! Rust source emission.
//!
//! The generated code rebuilds the exact [`Program`] through [`ProgramBuilder`]
//! calls replayed in op order, then wraps it in a parser type with one
//! `parse_<rule>` method per rule.
//!
//! [`ProgramBuilder`]: thicket_ir::ProgramBuilder

use std::fmt::Write;

use thicket_core::utils::{to_pascal_case, to_rust_ident, to_snake_case};
use thicket_ir::{BuildError, Grammar, Op, Program};

use super::RustConfig;
use super::lower::lower;

/// Generate Rust source for `grammar`.
pub fn emit_rust(grammar: &Grammar, config: &RustConfig) -> Result<String, BuildError> {
    let program = lower(grammar)?;
    Ok(RustEmitter::new(&program, config.clone()).emit())
}

pub struct RustEmitter<'p> {
    program: &'p Program,
    config: RustConfig,
    depth: usize,
    output: String,
}

impl<'p> RustEmitter<'p> {
    pub fn new(program: &'p Program, config: RustConfig) -> Self {
        Self {
            program,
            config,
            depth: 0,
            output: String::new(),
        }
    }

    pub fn emit(mut self) -> String {
        let program = self.program;
        for line in program.leading_comment_lines() {
            self.output.push_str(line);
            self.output.push('\n');
        }
        self.line(&format!(
            "// @generated by thicket from grammar `{}`. Do not edit.",
            program.name()
        ));

        let segments: Vec<&str> = program.name().split("::").collect();
        let (last, modules) = segments
            .split_last()
            .map_or(("Grammar", &[][..]), |(last, rest)| (*last, rest));

        for module in modules {
            self.blank();
            self.line(&format!("pub mod {} {{", module_ident(module)));
            self.depth += 1;
        }

        if modules.is_empty() {
            self.blank();
        }
        self.emit_program_fn(last);
        self.emit_parser_type(last);

        for _ in modules {
            self.depth -= 1;
            self.line("}");
        }

        let trimmed = self.output.trim_end();
        let mut out = String::with_capacity(trimmed.len() + 1);
        out.push_str(trimmed);
        out.push('\n');
        out
    }

    fn rt(&self) -> &str {
        &self.config.runtime_path
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    fn emit_program_fn(&mut self, last: &str) {
        let program = self.program;
        let rt = self.rt().to_string();
        self.line(&format!(
            "/// Builds the compiled program for grammar `{}`.",
            program.name()
        ));
        self.line(&format!(
            "pub fn {}_program() -> Result<{rt}::ir::Program, {rt}::ir::BuildError> {{",
            to_snake_case(last)
        ));
        self.depth += 1;
        self.line(&format!(
            "let mut b = {rt}::ir::ProgramBuilder::new({:?});",
            program.name()
        ));
        for comment in program.leading_comment_lines() {
            self.line(&format!("b.leading_comment({comment:?});"));
        }
        for (id, rule) in program.rules() {
            self.line(&format!(
                "let r{} = b.declare_rule({:?});",
                id.index(),
                rule.name
            ));
        }
        for (i, op) in program.ops().iter().enumerate() {
            let call = self.op_call(op);
            self.line(&format!("let e{i} = b.{call};"));
        }
        for (id, rule) in program.rules() {
            self.line(&format!(
                "b.define_rule(r{}, e{});",
                id.index(),
                rule.body.index()
            ));
        }
        self.line("b.finish()");
        self.depth -= 1;
        self.line("}");
    }

    fn op_call(&self, op: &Op) -> String {
        let rt = self.rt();
        let ids = |items: &[thicket_ir::ExprId]| {
            items
                .iter()
                .map(|e| format!("e{}", e.index()))
                .collect::<Vec<_>>()
                .join(", ")
        };
        match op {
            Op::Terminal(text) => format!("terminal({text:?})"),
            Op::Class(class) => {
                let mut ranges = String::new();
                for (i, r) in class.ranges().iter().enumerate() {
                    if i > 0 {
                        ranges.push_str(", ");
                    }
                    let _ = write!(ranges, "{rt}::ir::ClassRange::new({:?}, {:?})", r.start, r.end);
                }
                format!(
                    "class({rt}::ir::CharClass::new({:?}, vec![{ranges}], {}))",
                    class.text(),
                    class.is_negated()
                )
            }
            Op::AnyChar => "any_char()".to_string(),
            Op::Sequence(items) => format!("sequence(vec![{}])", ids(items)),
            Op::Choice(alts) => format!("choice(vec![{}])", ids(alts)),
            Op::Repetition { inner, min } => format!("repetition(e{}, {min})", inner.index()),
            Op::Optional(inner) => format!("optional(e{})", inner.index()),
            Op::Lookahead(inner) => format!("lookahead(e{})", inner.index()),
            Op::NegativeLookahead(inner) => format!("negative_lookahead(e{})", inner.index()),
            Op::Predicate { hook, negated } => {
                format!("predicate({:?}, {negated})", self.program.resolve(*hook))
            }
            Op::Label { name, inner } => {
                format!("label({:?}, e{})", self.program.resolve(*name), inner.index())
            }
            Op::Call(rule) => format!("call(r{})", rule.index()),
        }
    }

    fn emit_parser_type(&mut self, last: &str) {
        let rt = self.rt().to_string();
        let ty = format!("{}Parser", to_pascal_case(last));

        self.blank();
        self.line("#[derive(Clone)]");
        self.line(&format!("pub struct {ty}({rt}::vm::CompiledParser);"));
        self.blank();
        self.line(&format!("impl {ty} {{"));
        self.depth += 1;
        self.line(&format!(
            "pub fn new() -> Result<Self, {rt}::ir::BuildError> {{"
        ));
        self.depth += 1;
        self.line(&format!(
            "Ok(Self({rt}::vm::CompiledParser::new({}_program()?)))",
            to_snake_case(last)
        ));
        self.depth -= 1;
        self.line("}");

        let rules: Vec<String> = self.program.rules().map(|(_, r)| r.name.clone()).collect();
        for rule in rules {
            self.blank();
            self.line(&format!(
                "pub fn parse_{}<'i>(&mut self, input: &'i str) -> Result<Option<{rt}::vm::SyntaxTree<'i>>, {rt}::vm::RuntimeError> {{",
                to_snake_case(&rule)
            ));
            self.depth += 1;
            self.line(&format!(
                "self.0.parse(input, {rt}::vm::ParseOptions::new().root({rule:?}))"
            ));
            self.depth -= 1;
            self.line("}");
        }
        self.depth -= 1;
        self.line("}");

        self.blank();
        self.line(&format!("impl std::ops::Deref for {ty} {{"));
        self.depth += 1;
        self.line(&format!("type Target = {rt}::vm::CompiledParser;"));
        self.blank();
        self.line("fn deref(&self) -> &Self::Target {");
        self.line("    &self.0");
        self.line("}");
        self.depth -= 1;
        self.line("}");

        self.blank();
        self.line(&format!("impl std::ops::DerefMut for {ty} {{"));
        self.depth += 1;
        self.line("fn deref_mut(&mut self) -> &mut Self::Target {");
        self.line("    &mut self.0");
        self.line("}");
        self.depth -= 1;
        self.line("}");

        if self.config.nested_alias {
            self.blank();
            self.line(&format!("pub mod {} {{", module_ident(last)));
            self.line(&format!("    pub type Parser = super::{ty};"));
            self.line("}");
        }
    }
}

fn module_ident(segment: &str) -> String {
    to_rust_ident(&to_snake_case(segment))
}
