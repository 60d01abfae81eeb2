//! Module Discovery
//!
//! Enumerates sibling source files of a package directory and checks the
//! compiled-in registry against the source tree. Discovery never loads
//! anything itself; it exists so the link-time registrations cannot silently
//! drift from the files actually present on disk.

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::registry::registered_entries;
use crate::loader::types::DiscoveredModule;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Source file extension shared by the initializer and its siblings
const SOURCE_EXTENSION: &str = "rs";

/// Module name under which a package's initializer lives
const DEFAULT_INITIALIZER_NAME: &str = "mod";

/// Configuration for module discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Package source directory to enumerate
    pub search_path: PathBuf,
    /// Derived name of the initializer itself, never eligible for discovery
    pub initializer_name: String,
    /// Module names to exclude from discovery (glob patterns)
    pub excluded_modules: Vec<String>,
}

impl DiscoveryConfig {
    /// Create discovery configuration for a package source directory
    pub fn for_dir(search_path: impl Into<PathBuf>) -> Self {
        Self {
            search_path: search_path.into(),
            initializer_name: DEFAULT_INITIALIZER_NAME.to_string(),
            excluded_modules: Vec::new(),
        }
    }

    /// Set the derived name the initializer carries in this package
    pub fn with_initializer_name(mut self, name: &str) -> Self {
        self.initializer_name = name.to_string();
        self
    }

    /// Add module name patterns to exclude from discovery
    pub fn with_excludes(mut self, excludes: Vec<&str>) -> Self {
        self.excluded_modules = excludes.iter().map(|s| s.to_string()).collect();
        self
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded_modules.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(name))
                .unwrap_or(false)
        })
    }
}

/// Enumerate sibling modules of a package directory
///
/// Keeps regular files with the source extension, skipping the initializer's
/// own name and any excluded pattern. Result order is unspecified.
pub fn discover_modules(config: &DiscoveryConfig) -> LoaderResult<Vec<DiscoveredModule>> {
    let dir = &config.search_path;
    let entries = std::fs::read_dir(dir).map_err(|e| LoaderError::Discovery {
        path: dir.clone(),
        cause: e.to_string(),
    })?;

    let mut modules = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoaderError::Discovery {
            path: dir.clone(),
            cause: e.to_string(),
        })?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }

        // Directories and special files can carry a source-like name;
        // only regular files qualify.
        match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => {}
            _ => {
                log::trace!("Skipping non-regular entry {}", path.display());
                continue;
            }
        }

        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };

        if name == config.initializer_name {
            continue;
        }
        if config.is_excluded(&name) {
            log::debug!("Module '{}' excluded from discovery", name);
            continue;
        }

        modules.push(DiscoveredModule { path, name });
    }

    log::debug!(
        "Discovered {} candidate modules in {}",
        modules.len(),
        dir.display()
    );
    Ok(modules)
}

/// Check the link-time registrations against a package source directory
///
/// Every eligible sibling file must have a registration and every
/// registration must have a sibling file; any disagreement fails loudly
/// with the offending names.
pub fn verify_registry_coverage(config: &DiscoveryConfig) -> LoaderResult<()> {
    let discovered = discover_modules(config)?;
    let registered: Vec<&str> = registered_entries().iter().map(|e| e.name).collect();
    check_drift(&discovered, &registered)
}

/// Compare discovered module names with a registered name list
pub fn check_drift(discovered: &[DiscoveredModule], registered: &[&str]) -> LoaderResult<()> {
    let on_disk: BTreeSet<&str> = discovered.iter().map(|m| m.name.as_str()).collect();
    let in_registry: BTreeSet<&str> = registered.iter().copied().collect();

    let missing: Vec<String> = on_disk
        .difference(&in_registry)
        .map(|s| s.to_string())
        .collect();
    let stale: Vec<String> = in_registry
        .difference(&on_disk)
        .map(|s| s.to_string())
        .collect();

    if missing.is_empty() && stale.is_empty() {
        Ok(())
    } else {
        Err(LoaderError::RegistryDrift { missing, stale })
    }
}
