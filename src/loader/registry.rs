//! Module Registry
//!
//! Thread-safe registry tracking which modules are registered and which have
//! had their initializers run, plus the link-time entry collection that
//! replaces an explicitly maintained module list.

use crate::core::sync::{handle_rwlock_read, handle_rwlock_write};
use crate::loader::error::{LoaderError, LoaderResult};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// One compiled-in module registration
///
/// The static analog of an importable sibling module: `init` carries the
/// load-time side effect (typically registering a capability with the host),
/// `name` the derived name the source file would have on disk.
pub struct ModuleEntry {
    pub name: &'static str,
    pub init: fn() -> LoaderResult<()>,
}

// Register ModuleEntry with inventory for link-time collection
inventory::collect!(ModuleEntry);

/// Macro for registering a module's initializer with the loader
///
/// Submits a `ModuleEntry` so the module is picked up by
/// `initialize_modules()` without appearing in any maintained list.
#[macro_export]
macro_rules! register_module {
    ($name:expr, $init:expr) => {
        inventory::submit! {
            $crate::loader::registry::ModuleEntry {
                name: $name,
                init: $init,
            }
        }
    };
}

/// Snapshot of all link-time registrations
///
/// Iteration order over entries is unspecified; no module may rely on
/// running before or after another.
pub fn registered_entries() -> Vec<&'static ModuleEntry> {
    inventory::iter::<ModuleEntry>().collect()
}

/// Registry for tracking module registration and initialization state
#[derive(Debug)]
pub struct ModuleRegistry {
    /// Names of all modules seen by the loader
    known: HashSet<String>,

    /// Names of modules whose initializer has already run
    initialized: HashSet<String>,
}

impl ModuleRegistry {
    /// Create a new empty module registry
    pub fn new() -> Self {
        Self {
            known: HashSet::new(),
            initialized: HashSet::new(),
        }
    }

    /// Record a module name in the registry
    ///
    /// Returns true if the name was not yet known. Recording is idempotent;
    /// duplicate detection within a single batch is the loader's job.
    pub fn record_module(&mut self, name: &str) -> bool {
        self.known.insert(name.to_string())
    }

    /// Check if a module is known to the registry
    pub fn has_module(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Mark a module's initializer as having run
    pub fn mark_initialized(&mut self, name: &str) -> LoaderResult<()> {
        if !self.known.contains(name) {
            return Err(LoaderError::ModuleNotFound {
                module_name: name.to_string(),
            });
        }
        self.initialized.insert(name.to_string());
        Ok(())
    }

    /// Check if a module's initializer has already run
    pub fn is_initialized(&self, name: &str) -> bool {
        self.initialized.contains(name)
    }

    /// Get list of all known module names (sorted for reporting only)
    pub fn module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.known.iter().cloned().collect();
        names.sort();
        names
    }

    /// Get list of initialized module names (sorted for reporting only)
    pub fn initialized_modules(&self) -> Vec<String> {
        let mut names: Vec<String> = self.initialized.iter().cloned().collect();
        names.sort();
        names
    }

    /// Get total count of known modules
    pub fn module_count(&self) -> usize {
        self.known.len()
    }

    /// Clear all registry state
    pub fn clear(&mut self) {
        self.known.clear();
        self.initialized.clear();
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared module registry
#[derive(Debug, Clone)]
pub struct SharedModuleRegistry {
    inner: Arc<RwLock<ModuleRegistry>>,
}

impl SharedModuleRegistry {
    /// Create a new shared module registry
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ModuleRegistry::new())),
        }
    }

    /// Get access to the inner registry for read/write operations
    pub fn inner(&self) -> &Arc<RwLock<ModuleRegistry>> {
        &self.inner
    }

    /// Convenience method to check if a module is known
    pub fn has_module(&self, name: &str) -> LoaderResult<bool> {
        let registry = handle_rwlock_read(self.inner.read(), |message| LoaderError::Generic {
            message,
        })?;
        Ok(registry.has_module(name))
    }

    /// Convenience method to check if a module's initializer has run
    pub fn is_initialized(&self, name: &str) -> LoaderResult<bool> {
        let registry = handle_rwlock_read(self.inner.read(), |message| LoaderError::Generic {
            message,
        })?;
        Ok(registry.is_initialized(name))
    }

    /// Convenience method to get known module names
    pub fn module_names(&self) -> LoaderResult<Vec<String>> {
        let registry = handle_rwlock_read(self.inner.read(), |message| LoaderError::Generic {
            message,
        })?;
        Ok(registry.module_names())
    }

    /// Convenience method to get initialized module names
    pub fn initialized_modules(&self) -> LoaderResult<Vec<String>> {
        let registry = handle_rwlock_read(self.inner.read(), |message| LoaderError::Generic {
            message,
        })?;
        Ok(registry.initialized_modules())
    }

    /// Convenience method to get known module count
    pub fn module_count(&self) -> LoaderResult<usize> {
        let registry = handle_rwlock_read(self.inner.read(), |message| LoaderError::Generic {
            message,
        })?;
        Ok(registry.module_count())
    }

    /// Convenience method to clear all registry state
    pub fn clear(&self) -> LoaderResult<()> {
        let mut registry = handle_rwlock_write(self.inner.write(), |message| {
            LoaderError::Generic { message }
        })?;
        registry.clear();
        Ok(())
    }
}

impl Default for SharedModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
