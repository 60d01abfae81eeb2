//! Module Auto-Loader
//!
//! Compile-time self-registration for modules whose load-time side effects
//! must run automatically, without an explicitly maintained call list.
//! Modules submit an initializer through `register_module!`; a one-shot
//! bootstrap runs every initializer exactly once per process, and discovery
//! keeps the compiled-in registrations honest against the source tree.

pub mod discovery;
pub mod error;
pub mod initialization;
pub mod registry;
pub mod types;

// Public API module - the preferred interface for the loader subsystem
pub mod api;
