//! In-memory code generation: `Grammar` to `Program`.

use thicket_ir::{BuildError, Grammar, Program, ProgramBuilder};

/// Every rule is declared before any body is lowered, so forward references
/// resolve and rule ids follow declaration order.
pub fn lower(grammar: &Grammar) -> Result<Program, BuildError> {
    let mut builder = ProgramBuilder::new(grammar.name());
    for line in grammar.leading_comment_lines() {
        builder.leading_comment(line.as_str());
    }

    let ids: Vec<_> = grammar
        .rules()
        .map(|rule| builder.declare_rule(&rule.name))
        .collect();

    for (rule, id) in grammar.rules().zip(ids) {
        let body = builder.add_expr(&rule.body);
        builder.define_rule(id, body);
    }

    builder.finish()
}
