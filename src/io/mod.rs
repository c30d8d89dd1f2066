pub mod walker;

pub use walker::FileWalker;

use crate::errors::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| Error::persistence_io("Failed to create directory", path, e))?;
    }
    Ok(())
}

/// Temporary sibling of `target` used for write-then-rename
fn temp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}

/// Write data to a temporary file and flush it to disk
fn write_temp_file(temp_path: &Path, data: &[u8]) -> Result<()> {
    let mut file = fs::File::create(temp_path)
        .map_err(|e| Error::persistence_io("Failed to create temporary file", temp_path, e))?;
    file.write_all(data)
        .and_then(|_| file.sync_all())
        .map_err(|e| Error::persistence_io("Failed to write temporary file", temp_path, e))
}

/// Write bytes atomically using a temporary file and rename. Readers see
/// either the previous content or the complete new content.
pub fn write_bytes_atomically(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }
    let temp_path = temp_path_for(target);

    write_temp_file(&temp_path, data)?;

    fs::rename(&temp_path, target).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::persistence_io(
            format!("Failed to rename {:?} -> {:?}", temp_path, target),
            target,
            e,
        )
    })
}

/// Serialize `value` as pretty JSON and write it atomically
pub fn write_json_atomically<T: Serialize>(target: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value)?;
    write_bytes_atomically(target, &data)
}

/// Write JSON to a path that must not exist yet. Fails with
/// `AlreadyExists` when it does, so a record can only be created once.
pub fn create_json_exclusively<T: Serialize>(target: &Path, value: &T) -> Result<()> {
    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }
    let data = serde_json::to_vec_pretty(value)?;
    let temp_path = temp_path_for(target);
    write_temp_file(&temp_path, &data)?;

    // hard_link refuses to replace an existing target
    let linked = fs::hard_link(&temp_path, target);
    let _ = fs::remove_file(&temp_path);
    linked.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            Error::Io(e)
        } else {
            Error::persistence_io("Failed to create record", target, e)
        }
    })
}

/// Read and deserialize a JSON file, `None` when it does not exist
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::persistence_io("Failed to read file", path, e)),
    }
}

/// Open (creating if needed) a file used only for locking
pub fn open_lock_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(|e| Error::persistence_io("Failed to open lock file", path, e))
}
