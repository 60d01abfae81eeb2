//! Public API for the module auto-loader
//!
//! This module provides the complete public API for the loader subsystem.
//! External consumers should import from here rather than directly from
//! internal modules.

// Module registration and bootstrap
pub use crate::loader::initialization::{global_registry, initialize_modules, run_entries};

// Error handling
pub use crate::loader::error::{LoaderError, LoaderResult};

// Registry access
pub use crate::loader::registry::{
    registered_entries, ModuleEntry, ModuleRegistry, SharedModuleRegistry,
};

// Discovery and drift checking
pub use crate::loader::discovery::{
    check_drift, discover_modules, verify_registry_coverage, DiscoveryConfig,
};

// Discovered module metadata
pub use crate::loader::types::DiscoveredModule;
