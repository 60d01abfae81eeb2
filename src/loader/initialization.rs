//! Module initialization helper module
//!
//! Runs registered module initializers with fail-fast semantics and owns the
//! process-wide one-shot bootstrap that replaces import-time package
//! initialization.

use crate::core::sync::{handle_mutex_poison, handle_rwlock_write};
use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::registry::{registered_entries, ModuleEntry, SharedModuleRegistry};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Mutex;

/// Process-wide registry backing `initialize_modules`
static GLOBAL_REGISTRY: Lazy<SharedModuleRegistry> = Lazy::new(SharedModuleRegistry::new);

/// Bootstrap lifecycle: once left, `Uninitialized` is never re-entered
#[derive(Debug, Clone)]
enum BootstrapState {
    Uninitialized,
    Initialized,
    Failed(LoaderError),
}

static BOOTSTRAP: Lazy<Mutex<BootstrapState>> =
    Lazy::new(|| Mutex::new(BootstrapState::Uninitialized));

/// Get the process-wide module registry
pub fn global_registry() -> &'static SharedModuleRegistry {
    &GLOBAL_REGISTRY
}

/// Run every link-time registered module initializer, once per process
///
/// The first call snapshots the registrations and runs each initializer;
/// later calls perform zero additional executions. A successful run is
/// recorded as `Initialized` and subsequent calls return `Ok`. A failed run
/// is recorded and the same error is returned on every later call; the
/// process should be considered unusable for module loading at that point.
///
/// Initializers must not call back into `initialize_modules`.
pub fn initialize_modules() -> LoaderResult<()> {
    let mut state = handle_mutex_poison(BOOTSTRAP.lock(), |message| LoaderError::Generic {
        message,
    })?;

    match &*state {
        BootstrapState::Initialized => Ok(()),
        BootstrapState::Failed(err) => Err(err.clone()),
        BootstrapState::Uninitialized => {
            let entries = registered_entries();
            log::debug!("Initializing {} registered modules", entries.len());

            let result = run_entries(&GLOBAL_REGISTRY, entries);
            *state = match &result {
                Ok(()) => BootstrapState::Initialized,
                Err(err) => BootstrapState::Failed(err.clone()),
            };
            result
        }
    }
}

/// Run a batch of module entries against a registry
///
/// Duplicate names are rejected before any initializer runs. Entries whose
/// initializer already ran are skipped, so repeating a batch executes no
/// module body a second time. The first initializer failure aborts the
/// batch; remaining entries are not run and nothing is retried.
pub fn run_entries<'a>(
    registry: &SharedModuleRegistry,
    entries: impl IntoIterator<Item = &'a ModuleEntry>,
) -> LoaderResult<()> {
    let entries: Vec<&ModuleEntry> = entries.into_iter().collect();

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.name) {
            return Err(LoaderError::DuplicateModule {
                module_name: entry.name.to_string(),
            });
        }
    }

    for entry in entries {
        let already_initialized = {
            let mut reg = handle_rwlock_write(registry.inner().write(), |message| {
                LoaderError::Generic { message }
            })?;
            if reg.is_initialized(entry.name) {
                true
            } else {
                reg.record_module(entry.name);
                false
            }
        };

        if already_initialized {
            log::trace!("Module '{}' already initialized, skipping", entry.name);
            continue;
        }

        // Lock released while the initializer runs; its side effects may
        // inspect the registry.
        (entry.init)().map_err(|e| LoaderError::InitFailed {
            module_name: entry.name.to_string(),
            cause: e.to_string(),
        })?;

        let mut reg = handle_rwlock_write(registry.inner().write(), |message| {
            LoaderError::Generic { message }
        })?;
        reg.mark_initialized(entry.name)?;
        log::trace!("Module '{}' initialized", entry.name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static ALPHA_RUNS: AtomicUsize = AtomicUsize::new(0);
    static BETA_RUNS: AtomicUsize = AtomicUsize::new(0);
    static FAULTY_RUNS: AtomicUsize = AtomicUsize::new(0);
    static TRAILING_RUNS: AtomicUsize = AtomicUsize::new(0);

    fn alpha_init() -> LoaderResult<()> {
        ALPHA_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn beta_init() -> LoaderResult<()> {
        BETA_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn faulty_init() -> LoaderResult<()> {
        FAULTY_RUNS.fetch_add(1, Ordering::SeqCst);
        Err(LoaderError::Generic {
            message: "registration rejected by host".to_string(),
        })
    }

    fn trailing_init() -> LoaderResult<()> {
        TRAILING_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    #[test]
    fn test_run_entries_runs_each_initializer_once() {
        let registry = SharedModuleRegistry::new();
        let entries = [
            ModuleEntry {
                name: "alpha",
                init: alpha_init,
            },
            ModuleEntry {
                name: "beta",
                init: beta_init,
            },
        ];

        run_entries(&registry, entries.iter()).unwrap();
        assert_eq!(ALPHA_RUNS.load(Ordering::SeqCst), 1);
        assert_eq!(BETA_RUNS.load(Ordering::SeqCst), 1);
        assert_eq!(
            registry.initialized_modules().unwrap(),
            vec!["alpha", "beta"]
        );

        // Repeating the batch performs zero additional executions
        run_entries(&registry, entries.iter()).unwrap();
        assert_eq!(ALPHA_RUNS.load(Ordering::SeqCst), 1);
        assert_eq!(BETA_RUNS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_run_entries_fails_fast_on_initializer_error() {
        let registry = SharedModuleRegistry::new();
        let entries = [
            ModuleEntry {
                name: "faulty",
                init: faulty_init,
            },
            ModuleEntry {
                name: "trailing",
                init: trailing_init,
            },
        ];

        let result = run_entries(&registry, entries.iter());
        match result.unwrap_err() {
            LoaderError::InitFailed { module_name, cause } => {
                assert_eq!(module_name, "faulty");
                assert!(cause.contains("registration rejected"));
            }
            other => panic!("Expected InitFailed error, got {:?}", other),
        }

        // The failing module is known but never marked initialized;
        // the entry after it was not run.
        assert!(registry.has_module("faulty").unwrap());
        assert!(!registry.is_initialized("faulty").unwrap());
        assert_eq!(TRAILING_RUNS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_run_entries_rejects_duplicates_before_running() {
        static DUP_RUNS: AtomicUsize = AtomicUsize::new(0);
        fn dup_init() -> LoaderResult<()> {
            DUP_RUNS.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        let registry = SharedModuleRegistry::new();
        let entries = [
            ModuleEntry {
                name: "twin",
                init: dup_init,
            },
            ModuleEntry {
                name: "twin",
                init: dup_init,
            },
        ];

        let result = run_entries(&registry, entries.iter());
        match result.unwrap_err() {
            LoaderError::DuplicateModule { module_name } => {
                assert_eq!(module_name, "twin");
            }
            other => panic!("Expected DuplicateModule error, got {:?}", other),
        }
        assert_eq!(DUP_RUNS.load(Ordering::SeqCst), 0);
    }

    #[test]
    #[serial]
    fn test_initialize_modules_is_idempotent() {
        // The library itself registers no entries; both calls must succeed
        // and the second must be a recorded no-op.
        initialize_modules().unwrap();
        initialize_modules().unwrap();
    }
}
