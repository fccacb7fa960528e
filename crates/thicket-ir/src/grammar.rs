//! Grammar AST: a named, ordered collection of rules.

use indexmap::IndexMap;

use crate::Expr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub body: Expr,
}

impl Rule {
    pub fn new(name: impl Into<String>, body: Expr) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

/// A parsed grammar.
///
/// Rules keep declaration order; the first one is the default root.
/// Leading comment lines (encoding pragmas) are carried verbatim so code
/// generation can put them first in its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    name: String,
    rules: IndexMap<String, Rule>,
    leading_comment_lines: Vec<String>,
}

impl Grammar {
    /// `name` may be nested with `::`, e.g. `Test::Grammar`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: IndexMap::new(),
            leading_comment_lines: Vec::new(),
        }
    }

    pub fn with_leading_comment_lines(mut self, lines: Vec<String>) -> Self {
        self.leading_comment_lines = lines;
        self
    }

    /// Add a rule. Returns the rule it replaced, if one had the same name.
    pub fn add_rule(&mut self, rule: Rule) -> Option<Rule> {
        self.rules.insert(rule.name.clone(), rule)
    }

    pub fn with_rule(mut self, name: impl Into<String>, body: Expr) -> Self {
        self.add_rule(Rule::new(name, body));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Segments of a nested name: `Test::Grammar` → `["Test", "Grammar"]`.
    pub fn name_segments(&self) -> impl Iterator<Item = &str> {
        self.name.split("::").filter(|s| !s.is_empty())
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// First declared rule.
    pub fn default_root(&self) -> Option<&Rule> {
        self.rules.first().map(|(_, rule)| rule)
    }

    pub fn leading_comment_lines(&self) -> &[String] {
        &self.leading_comment_lines
    }
}
