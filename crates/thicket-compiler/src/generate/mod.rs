//! Parser generation.
//!
//! - `lower`: `Grammar` to an in-memory `Program` for direct interpretation
//! - `rust`: Rust source that rebuilds the same `Program`

mod config;
pub mod lower;
pub mod rust;

#[cfg(test)]
mod lower_tests;
#[cfg(test)]
mod rust_tests;

pub use config::RustConfig;
pub use lower::lower;
pub use rust::{RustEmitter, emit_rust};
