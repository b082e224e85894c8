//! Atomic file writes and a typed TOML file handle built on them.

use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use zeroth_core::error::{Result, ZerothError};

/// Writes `bytes` to `path` through a temp file, fsync and rename.
///
/// Readers see either the old content or the new one. With `private` set the
/// file is created with mode 600 on Unix before any byte is written.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8], private: bool) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| ZerothError::io(format!("{} has no parent directory", path.display())))?;
    fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| ZerothError::io(format!("{} has no file name", path.display())))?;
    let tmp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    if private {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    #[cfg(not(unix))]
    let _ = private;

    let mut tmp_file = options.open(&tmp_path)?;
    tmp_file.write_all(bytes)?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Handle to a TOML file holding one `T`.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    pub fn save(&self, data: &T) -> Result<()> {
        let toml_string = toml::to_string_pretty(data)?;
        write_atomic(&self.path, toml_string.as_bytes(), false)
    }

    /// Load-modify-save under an exclusive lock on a sibling `.lock` file.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = self.acquire_lock()?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)?;

        Ok(data)
    }

    fn acquire_lock(&self) -> Result<FileLock> {
        let lock_path = self.path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()
            .map_err(|e| ZerothError::io(format!("Failed to lock {}: {}", lock_path.display(), e)))?;
        Ok(FileLock { file })
    }
}

/// Releases the lock on drop.
struct FileLock {
    file: File,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_load_missing_and_blank() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.toml");
        let file = AtomicTomlFile::<Sample>::new(path.clone());

        assert_eq!(file.load().unwrap(), None);
        fs::write(&path, "   \n").unwrap();
        assert_eq!(file.load().unwrap(), None);
    }

    #[test]
    fn test_save_creates_parent_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::new(dir.path().join("nested/sample.toml"));
        let sample = Sample {
            name: "coco".into(),
            count: 2,
        };

        file.save(&sample).unwrap();

        assert_eq!(file.load().unwrap(), Some(sample));
        assert!(!dir.path().join("nested/.sample.toml.tmp").exists());
    }

    #[test]
    fn test_update_applies_to_default() {
        let dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::new(dir.path().join("sample.toml"));

        let updated = file
            .update(Sample::default(), |s| {
                s.count += 1;
                Ok(())
            })
            .unwrap();
        let updated_again = file
            .update(Sample::default(), |s| {
                s.count += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.count, 1);
        assert_eq!(updated_again.count, 2);
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.toml");
        fs::write(&path, "name = ").unwrap();

        let err = AtomicTomlFile::<Sample>::new(path).load().unwrap_err();
        assert!(matches!(err, ZerothError::Serialization { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_private_write_sets_mode_600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.json");
        write_atomic(&path, b"{}", true).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
