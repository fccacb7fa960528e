/// Per-call parse options.
///
/// Every field overrides the handle's setting for one call only. Unset fields
/// fall back to the handle (`root`, `consume_all_input`) or to 0 (`start_index`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub(crate) root: Option<String>,
    pub(crate) consume_all_input: Option<bool>,
    pub(crate) start_index: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from this rule instead of the handle's root.
    pub fn root(mut self, rule: impl Into<String>) -> Self {
        self.root = Some(rule.into());
        self
    }

    /// When false, a match of a proper prefix of the input succeeds.
    pub fn consume_all_input(mut self, consume: bool) -> Self {
        self.consume_all_input = Some(consume);
        self
    }

    /// Byte offset to start matching at.
    pub fn start_index(mut self, index: usize) -> Self {
        self.start_index = Some(index);
        self
    }

    pub fn get_root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn get_consume_all_input(&self) -> Option<bool> {
        self.consume_all_input
    }

    pub fn get_start_index(&self) -> Option<usize> {
        self.start_index
    }
}
