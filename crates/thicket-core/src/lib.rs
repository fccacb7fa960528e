#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared building blocks for the Thicket toolchain.
//!
//! - [`Interner`] / [`Symbol`]: deduplicated labels and predicate hooks
//! - [`Colors`]: ANSI palette shared by dumps and traces
//! - [`Position`]: line/column math over parser input
//! - [`utils`]: identifier casing for generated code

mod colors;
mod interner;
mod position;
pub mod utils;

#[cfg(test)]
mod interner_tests;
#[cfg(test)]
mod position_tests;
#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use interner::{Interner, Symbol};
pub use position::{Position, position_of};
