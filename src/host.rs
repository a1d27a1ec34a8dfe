//! Operating-system integration: temporary output names and the default viewer

use std::path::{Path, PathBuf};
use tracing::debug;
use crate::error::{Error, Result};

/// Supplies a fresh, uniquely named path for an output file
pub trait TemporaryFileProvider {
    /// Create an empty file whose name starts with `prefix` and return its path
    fn create(&self, prefix: &str) -> Result<PathBuf>;
}

/// Opens a file with the user's default application
pub trait ApplicationLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Temporary files in a directory (the system temp directory by default)
#[derive(Debug, Clone, Default)]
pub struct SystemTempFiles {
    dir: Option<PathBuf>,
}

impl SystemTempFiles {
    /// Create temporary files in `dir` instead of the system temp directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl TemporaryFileProvider for SystemTempFiles {
    fn create(&self, prefix: &str) -> Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);

        let file = match self.dir {
            Some(ref dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        // Keep the file on disk; the caller owns it from here on
        let path = file
            .into_temp_path()
            .keep()
            .map_err(|e| Error::Io(e.error))?;

        debug!(path = %path.display(), "created temporary output file");
        Ok(path)
    }
}

/// Launches files with the desktop's default handler
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultViewer;

impl ApplicationLauncher for DefaultViewer {
    fn open(&self, path: &Path) -> Result<()> {
        open::that_detached(path).map_err(|e| Error::Launch(format!("{}: {}", path.display(), e)))
    }
}
