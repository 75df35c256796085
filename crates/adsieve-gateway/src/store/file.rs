//! File-backed store: `<dir>/<key>.json`, replaced atomically on write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use adsieve_core::error::{AdsieveError, Result};

use super::{validate_key, KvStore};

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            AdsieveError::Storage(format!("create store dir {} failed: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AdsieveError::Storage(format!(
                "read {} failed: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        fs::write(&tmp, value.as_bytes()).map_err(|e| {
            AdsieveError::Storage(format!("write {} failed: {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            AdsieveError::Storage(format!("replace {} failed: {e}", path.display()))
        })
    }
}
