//! Syntax tree produced by a successful parse.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. A node
//! owns its elements; `parent` is a plain index set when the enclosing
//! sequence or repetition node is built. Nodes created by failed attempts are
//! discarded by truncating the arena, so every surviving node is reachable
//! from the root.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use thicket_core::{Colors, Symbol};
use thicket_ir::{Program, RuleId};

/// Index into a [`SyntaxTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What produced a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A terminal, character class or any-character match.
    Terminal,
    Sequence,
    Repetition,
    /// Zero-width: an absent optional, a lookahead or a predicate.
    Empty,
}

impl NodeKind {
    fn short_name(self) -> &'static str {
        match self {
            NodeKind::Terminal => "terminal",
            NodeKind::Sequence => "seq",
            NodeKind::Repetition => "rep",
            NodeKind::Empty => "empty",
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) kind: NodeKind,
    pub(crate) elements: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) rule: Option<RuleId>,
    pub(crate) label: Option<Symbol>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            kind,
            elements: Vec::new(),
            parent: None,
            rule: None,
            label: None,
        }
    }
}

/// Owned result of a successful parse, borrowing the input it was parsed from.
#[derive(Clone)]
pub struct SyntaxTree<'i> {
    input: &'i str,
    program: Arc<Program>,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl<'i> SyntaxTree<'i> {
    pub(crate) fn new(
        input: &'i str,
        program: Arc<Program>,
        nodes: Vec<NodeData>,
        root: NodeId,
    ) -> Self {
        Self {
            input,
            program,
            nodes,
            root,
        }
    }

    pub fn root(&self) -> Node<'_> {
        self.handle(self.root)
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then(|| self.handle(id))
    }

    /// The full input, including text outside the root interval.
    pub fn input(&self) -> &'i str {
        self.input
    }

    /// Interval of the root node.
    pub fn interval(&self) -> Range<usize> {
        self.root().interval()
    }

    /// Text of the root node.
    pub fn text_value(&self) -> &str {
        self.root().text_value()
    }

    /// Shortcut for `root().elements()`.
    pub fn elements(&self) -> Elements<'_> {
        self.root().elements()
    }

    pub fn element(&self, index: usize) -> Option<Node<'_>> {
        self.root().element(index)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    /// Indented outline of the tree, one node per line.
    ///
    /// `label:(rule) kind start..end "text"`; text is shown for terminals only.
    pub fn render(&self, colors: Colors) -> String {
        let mut out = String::new();
        render_node(&mut out, self.root(), 0, &colors);
        out
    }

    fn handle(&self, id: NodeId) -> Node<'_> {
        Node {
            input: self.input,
            program: self.program.as_ref(),
            nodes: &self.nodes,
            id,
        }
    }
}

impl fmt::Debug for SyntaxTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Colors::OFF))
    }
}

impl Serialize for SyntaxTree<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root().serialize(serializer)
    }
}

fn render_node(out: &mut String, node: Node<'_>, depth: usize, c: &Colors) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    if let Some(label) = node.label() {
        out.push_str(&format!("{}{}{}:", c.blue, label, c.reset));
    }
    if let Some(rule) = node.rule_name() {
        out.push_str(&format!("({}{}{}) ", c.blue, rule, c.reset));
    }
    let Range { start, end } = node.interval();
    out.push_str(&format!(
        "{} {}{start}..{end}{}",
        node.kind().short_name(),
        c.dim,
        c.reset
    ));
    if node.kind() == NodeKind::Terminal {
        out.push_str(&format!(" {}{:?}{}", c.green, node.text_value(), c.reset));
    }
    out.push('\n');

    for child in node.elements() {
        render_node(out, child, depth + 1, c);
    }
}

/// Borrowed handle to one node of a tree.
#[derive(Clone, Copy)]
pub struct Node<'t> {
    input: &'t str,
    program: &'t Program,
    nodes: &'t [NodeData],
    id: NodeId,
}

impl<'t> Node<'t> {
    pub(crate) fn from_parts(
        input: &'t str,
        program: &'t Program,
        nodes: &'t [NodeData],
        id: NodeId,
    ) -> Self {
        Self {
            input,
            program,
            nodes,
            id,
        }
    }

    #[inline]
    fn data(&self) -> &'t NodeData {
        &self.nodes[self.id.index()]
    }

    fn with_id(&self, id: NodeId) -> Node<'t> {
        Node { id, ..*self }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Half-open byte interval `[start, end)`.
    pub fn interval(&self) -> Range<usize> {
        let data = self.data();
        data.start..data.end
    }

    pub fn start(&self) -> usize {
        self.data().start
    }

    pub fn end(&self) -> usize {
        self.data().end
    }

    pub fn text_value(&self) -> &'t str {
        &self.input[self.interval()]
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn is_terminal(&self) -> bool {
        self.kind() == NodeKind::Terminal
    }

    pub fn is_empty(&self) -> bool {
        self.data().start == self.data().end
    }

    pub fn elements(&self) -> Elements<'t> {
        Elements {
            node: *self,
            ids: self.data().elements.iter(),
        }
    }

    pub fn element(&self, index: usize) -> Option<Node<'t>> {
        self.data().elements.get(index).map(|&id| self.with_id(id))
    }

    pub fn element_count(&self) -> usize {
        self.data().elements.len()
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.with_id(id))
    }

    /// The rule this node was produced for. When rules delegate to each other
    /// the outermost one wins.
    pub fn rule(&self) -> Option<RuleId> {
        self.data().rule
    }

    pub fn rule_name(&self) -> Option<&'t str> {
        self.rule().map(|rule| self.program.rule(rule).name.as_str())
    }

    pub fn label(&self) -> Option<&'t str> {
        self.data().label.map(|sym| self.program.resolve(sym))
    }

    /// First direct element bound under `name`.
    pub fn child_by_label(&self, name: &str) -> Option<Node<'t>> {
        self.elements().find(|child| child.label() == Some(name))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id.0)
            .field("kind", &self.kind())
            .field("interval", &self.interval())
            .field("rule", &self.rule_name())
            .field("label", &self.label())
            .field("text", &self.text_value())
            .finish()
    }
}

impl Serialize for Node<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", &self.kind())?;
        if let Some(rule) = self.rule_name() {
            map.serialize_entry("rule", rule)?;
        }
        if let Some(label) = self.label() {
            map.serialize_entry("label", label)?;
        }
        map.serialize_entry("span", &[self.start(), self.end()])?;
        map.serialize_entry("text", self.text_value())?;
        if self.element_count() > 0 {
            let elements: Vec<Node<'_>> = self.elements().collect();
            map.serialize_entry("elements", &elements)?;
        }
        map.end()
    }
}

/// Iterator over a node's elements.
#[derive(Clone)]
pub struct Elements<'t> {
    node: Node<'t>,
    ids: std::slice::Iter<'t, NodeId>,
}

impl<'t> Iterator for Elements<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| self.node.with_id(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Elements<'_> {}

impl DoubleEndedIterator for Elements<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&id| self.node.with_id(id))
    }
}
