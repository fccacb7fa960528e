//! Semantic predicates: host callables bound to `&{ hook }` expressions.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thicket_ir::Program;

use super::tree::{Node, NodeData, NodeId};

/// Error returned by a predicate callable. Aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PredicateError {
    message: String,
}

impl PredicateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type PredicateFn = Arc<dyn Fn(&MatchEnv<'_>) -> Result<bool, PredicateError> + Send + Sync>;

/// What a predicate can see when it is evaluated.
///
/// Elements are those matched so far by the innermost enclosing sequence of
/// the same rule.
pub struct MatchEnv<'a> {
    pub(crate) input: &'a str,
    pub(crate) program: &'a Program,
    pub(crate) nodes: &'a [NodeData],
    pub(crate) elements: &'a [NodeId],
    pub(crate) position: usize,
}

impl<'a> MatchEnv<'a> {
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset the predicate is evaluated at.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Input from the current position on.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn element(&self, index: usize) -> Option<Node<'a>> {
        self.elements.get(index).map(|&id| self.handle(id))
    }

    pub fn elements(&self) -> impl ExactSizeIterator<Item = Node<'a>> + '_ {
        self.elements.iter().map(|&id| self.handle(id))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Most recent element bound under `name`.
    pub fn label(&self, name: &str) -> Option<Node<'a>> {
        self.elements
            .iter()
            .rev()
            .map(|&id| self.handle(id))
            .find(|node| node.label() == Some(name))
    }

    fn handle(&self, id: NodeId) -> Node<'a> {
        Node::from_parts(self.input, self.program, self.nodes, id)
    }
}

/// Predicate callables keyed by hook text.
#[derive(Clone, Default)]
pub(crate) struct PredicateTable {
    hooks: HashMap<String, PredicateFn>,
}

impl PredicateTable {
    pub(crate) fn bind(&mut self, key: &str, f: PredicateFn) {
        self.hooks.insert(key.trim().to_string(), f);
    }

    pub(crate) fn unbind(&mut self, key: &str) -> bool {
        self.hooks.remove(key.trim()).is_some()
    }

    pub(crate) fn get(&self, key: &str) -> Option<&PredicateFn> {
        self.hooks.get(key)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.hooks.contains_key(key)
    }

    /// Callables indexed by the program's symbol ids.
    pub(crate) fn resolve(&self, program: &Program) -> Vec<Option<PredicateFn>> {
        program
            .symbols()
            .iter()
            .map(|(_, text)| self.get(text).cloned())
            .collect()
    }
}

impl fmt::Debug for PredicateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_set().entries(keys).finish()
    }
}
