//! Loader Error Handling
//!
//! Error types for module registration, discovery, and initialization,
//! covering registry drift, duplicate registrations, and load-time failures.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for loader operations
pub type LoaderResult<T> = std::result::Result<T, LoaderError>;

/// Error types for the module auto-loader
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// Module not present in the registry
    ModuleNotFound { module_name: String },

    /// Two registrations share the same derived name
    DuplicateModule { module_name: String },

    /// A module's initializer failed; remaining modules were not run
    InitFailed { module_name: String, cause: String },

    /// Compiled-in registrations and the source tree disagree
    RegistryDrift {
        missing: Vec<String>,
        stale: Vec<String>,
    },

    /// The package source directory could not be enumerated
    Discovery { path: PathBuf, cause: String },

    /// Generic loader error
    Generic { message: String },
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::ModuleNotFound { module_name } => {
                write!(f, "Module not found: {}", module_name)
            }
            LoaderError::DuplicateModule { module_name } => {
                write!(f, "Module '{}' is registered more than once", module_name)
            }
            LoaderError::InitFailed { module_name, cause } => {
                write!(f, "Failed to initialize module '{}': {}", module_name, cause)
            }
            LoaderError::RegistryDrift { missing, stale } => {
                write!(
                    f,
                    "Registry does not match source tree (missing: [{}], stale: [{}])",
                    missing.join(", "),
                    stale.join(", ")
                )
            }
            LoaderError::Discovery { path, cause } => {
                write!(f, "Failed to enumerate '{}': {}", path.display(), cause)
            }
            LoaderError::Generic { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for LoaderError {}
