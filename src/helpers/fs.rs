//! File System Utilities
//!
//! Platform directory management and small file helpers.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "lodging", "lodging-admin").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Create `dir` (and parents) when missing and return it
pub fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/lodging-admin/` or `$XDG_CONFIG_HOME/lodging-admin/`
/// - **macOS**: `~/Library/Application Support/com.lodging.lodging-admin/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\lodging\lodging-admin\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Get the data directory holding the collection snapshots and the session
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/lodging-admin/`
/// - **macOS**: `~/Library/Application Support/com.lodging.lodging-admin/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\lodging\lodging-admin\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir())
}

/// Get the directory for rolling log files (`<cache dir>/logs`)
pub fn get_or_create_log_dir() -> Result<PathBuf> {
    ensure_dir(&project_dirs()?.cache_dir().join("logs"))
}

/// Write `contents` to `path` via a sibling temp file and rename
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Remove a file, treating "already gone" as success
pub fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Check if running in development mode
pub fn is_development() -> bool {
    cfg!(debug_assertions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("file.json");
        write_atomic(&path, b"[]").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_remove_if_exists_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent");
        assert!(remove_if_exists(&path).is_ok());
        fs::write(&path, "x").expect("write");
        remove_if_exists(&path).expect("remove");
        assert!(!path.exists());
    }
}
