use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Replace `path` with `contents` through a sibling temp file and a rename,
/// so readers see either the old file or the complete new one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    let result = write_and_sync(&tmp, contents)
        .and_then(|_| fs::rename(&tmp, path).context("Failed to swap temp file into place"));

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.with_context(|| format!("Failed to write {}", path.display()))
}

pub fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_and_sync(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(path).context("Failed to create temp file")?;
    file.write_all(contents).context("Failed to write temp file")?;
    file.sync_all().context("Failed to flush temp file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.json");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_write_atomic_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history").join("preds_2025-01-02.csv");

        write_atomic(&path, b"Player\n").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_failed_swap_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        // A directory at the target path makes the rename fail.
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "old").unwrap();

        assert!(write_atomic(&path, b"new").is_err());
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "old");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_temp_path_appends_suffix() {
        assert_eq!(
            temp_path(Path::new("data/weights.json")),
            PathBuf::from("data/weights.json.tmp")
        );
    }
}
