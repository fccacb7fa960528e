//! Configuration for Rust source emission.

/// Configuration for Rust emission.
#[derive(Clone, Debug)]
pub struct RustConfig {
    /// Path under which generated code finds the runtime crate
    pub(crate) runtime_path: String,
    /// Emit `pub mod <last> { pub type Parser = ... }` next to the flat parser type
    pub(crate) nested_alias: bool,
}

impl Default for RustConfig {
    fn default() -> Self {
        Self {
            runtime_path: "thicket".to_string(),
            nested_alias: true,
        }
    }
}

impl RustConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime crate path, e.g. `::thicket` or `crate::rt`.
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    pub fn nested_alias(mut self, value: bool) -> Self {
        self.nested_alias = value;
        self
    }
}
