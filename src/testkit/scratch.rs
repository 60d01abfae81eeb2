//! Scratch File Fixture
//!
//! Hands a test an exclusively owned, pre-created empty file inside a fresh
//! temporary directory and removes the whole directory when the guard goes
//! out of scope, on every exit path.

use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixed name of the file created inside each scratch directory
const SCRATCH_FILE_NAME: &str = "scratch.tmp";

/// Prefix for scratch directory names under the platform temp area
const SCRATCH_DIR_PREFIX: &str = "autoload-scratch-";

#[derive(Debug, thiserror::Error)]
pub enum ScratchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScratchResult<T> = Result<T, ScratchError>;

/// One empty file created for the exclusive use of a single test
///
/// The containing directory is uniquely named per acquisition, so
/// concurrently running tests never share a scratch file. Dropping the
/// guard removes the directory and everything inside it; `close` does the
/// same eagerly and reports the removal outcome instead of masking it.
#[derive(Debug)]
pub struct ScratchFile {
    dir: TempDir,
    path: PathBuf,
}

impl ScratchFile {
    /// Create a fresh scratch directory containing one empty file
    pub fn acquire() -> ScratchResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_DIR_PREFIX)
            .tempdir()?;
        let path = dir.path().join(SCRATCH_FILE_NAME);

        // Created with zero bytes and closed before the caller sees it
        File::create(&path)?;

        log::trace!("Scratch file created at {}", path.display());
        Ok(Self { dir, path })
    }

    /// Path of the empty file handed to the consumer
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the containing directory
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the scratch directory now, surfacing any removal failure
    ///
    /// Dropping the guard also removes the directory but swallows errors;
    /// call this from teardown code that must report cleanup problems.
    pub fn close(self) -> ScratchResult<()> {
        self.dir.close()?;
        Ok(())
    }
}
