//! Human-readable program dump for debugging and snapshot tests.
//!
//! ```text
//! [grammar]
//! name = Choice
//! root = choice
//!
//! [rules]
//! R0 choice = E3
//!
//! [code]
//! E0  'a'
//! E1  'b'
//! E2  'c'
//! E3  choice E0 E1 E2
//! ```

use std::fmt::Write as _;

use thicket_core::Colors;

use crate::program::{ExprId, Op, Program, RuleId};

/// Render `program` in the dump format. Colors are off for snapshots.
pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_dump(&mut out, program, colors);
    out
}

fn write_dump(out: &mut String, program: &Program, c: Colors) -> std::fmt::Result {
    writeln!(out, "[grammar]")?;
    writeln!(out, "name = {}{}{}", c.blue, program.name(), c.reset)?;
    match program.default_root() {
        Some(root) => writeln!(out, "root = {}", program.rule(root).name)?,
        None => writeln!(out, "root = -")?,
    }

    if !program.leading_comment_lines().is_empty() {
        writeln!(out, "\n[comments]")?;
        for line in program.leading_comment_lines() {
            writeln!(out, "{}{}{}", c.dim, line, c.reset)?;
        }
    }

    if !program.symbols().is_empty() {
        writeln!(out, "\n[symbols]")?;
        for (sym, text) in program.symbols().iter() {
            writeln!(out, "S{} {:?}", sym.as_u32(), text)?;
        }
    }

    writeln!(out, "\n[rules]")?;
    for (id, rule) in program.rules() {
        writeln!(
            out,
            "R{} {}{}{} = E{}",
            id.index(),
            c.blue,
            rule.name,
            c.reset,
            rule.body.index()
        )?;
    }

    writeln!(out, "\n[code]")?;
    let width = width_for_count(program.ops().len());
    for (i, op) in program.ops().iter().enumerate() {
        let id = format!("E{i}");
        writeln!(out, "{id:<w$}  {}", format_op(program, op, c), w = width + 1)?;
    }

    Ok(())
}

fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

fn ids(items: &[ExprId]) -> String {
    items
        .iter()
        .map(|id| format!("E{}", id.index()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn rule_name(program: &Program, rule: RuleId) -> &str {
    &program.rule(rule).name
}

fn format_op(program: &Program, op: &Op, c: Colors) -> String {
    match op {
        Op::Terminal(_) | Op::Class(_) | Op::AnyChar => {
            let text = op.describe().unwrap_or_default();
            format!("{}{}{}", c.green, text, c.reset)
        }
        Op::Sequence(items) => format!("seq {}", ids(items)),
        Op::Choice(items) => format!("choice {}", ids(items)),
        Op::Repetition { inner, min } => format!("repeat E{} min={min}", inner.index()),
        Op::Optional(inner) => format!("opt E{}", inner.index()),
        Op::Lookahead(inner) => format!("and E{}", inner.index()),
        Op::NegativeLookahead(inner) => format!("not E{}", inner.index()),
        Op::Predicate { hook, negated } => {
            let sigil = if *negated { "!" } else { "&" };
            format!(
                "pred{sigil} S{}{}  ; {}{}",
                hook.as_u32(),
                c.dim,
                program.resolve(*hook),
                c.reset
            )
        }
        Op::Label { name, inner } => format!(
            "label S{} E{}{}  ; {}{}",
            name.as_u32(),
            inner.index(),
            c.dim,
            program.resolve(*name),
            c.reset
        ),
        Op::Call(rule) => format!(
            "call R{}{}  ; {}{}",
            rule.index(),
            c.dim,
            rule_name(program, *rule),
            c.reset
        ),
    }
}
