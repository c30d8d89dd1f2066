use crate::errors::{Error, Result};
use crate::io;
use std::path::{Path, PathBuf};

/// Cross-process advisory lock on `run.lock`
pub struct RunLock {
    path: PathBuf,
    lock: fd_lock::RwLock<std::fs::File>,
}

impl RunLock {
    pub fn open(path: &Path) -> Result<Self> {
        let file = io::open_lock_file(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            lock: fd_lock::RwLock::new(file),
        })
    }

    /// Run `f` while holding the write lock. A lock held elsewhere is
    /// `RunInProgress` and `f` is not called.
    pub fn exclusive<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let _guard = match self.lock.try_write() {
            Ok(guard) => guard,
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                return Err(Error::RunInProgress(self.path.clone()))
            }
            Err(e) => return Err(Error::persistence_io("Failed to lock", &self.path, e)),
        };
        f()
    }
}
