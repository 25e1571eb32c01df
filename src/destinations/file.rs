//! Append-only file destination

use crate::core::{Destination, LoggerError, Result};
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log file opened in append mode.
///
/// Each event goes out as a single `write_all` on an `O_APPEND` handle, so
/// concurrent events land whole. Writers share the handle through a read
/// lock; only `close` takes the write lock.
pub struct FileDestination {
    path: PathBuf,
    name: String,
    file: RwLock<Option<File>>,
}

impl FileDestination {
    /// Open or create `path` for appending.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        let file = options
            .open(&path)
            .map_err(|e| LoggerError::file_open(path.display().to_string(), e))?;

        Ok(Self {
            name: format!("file:{}", path.display()),
            path,
            file: RwLock::new(Some(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.file.read().is_none()
    }
}

impl Destination for FileDestination {
    fn write_all(&self, buf: &[u8]) -> Result<()> {
        let guard = self.file.read();
        let mut file: &File = guard
            .as_ref()
            .ok_or_else(|| LoggerError::destination_closed(&self.name))?;
        file.write_all(buf)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref file) = *self.file.read() {
            let mut file: &File = file;
            file.flush()?;
        }
        Ok(())
    }

    /// Sync and release the handle. Closing twice is a no-op.
    fn close(&self) -> Result<()> {
        let file = self.file.write().take();
        if let Some(file) = file {
            file.sync_all().map_err(|e| {
                LoggerError::io_operation(
                    "closing log file",
                    format!("sync of '{}' failed", self.path.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
