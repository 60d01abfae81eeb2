//! Test Support Utilities
//!
//! Scoped resources for test code that need guaranteed teardown.

pub mod scratch;

pub use scratch::{ScratchError, ScratchFile, ScratchResult};
