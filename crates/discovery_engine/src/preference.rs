use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use discovery_logging::discovery_warn;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize preference: {0}")]
    Serialize(#[from] ron::Error),
    #[error("preference path does not name a file: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Persisted integer setting. Readers never fail: unreadable values are 0.
pub trait IntPreference: Send + Sync {
    fn get(&self) -> i64;

    fn set(&self, value: i64) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default)]
pub struct InMemoryIntPreference {
    value: AtomicI64,
}

impl InMemoryIntPreference {
    pub fn new(value: i64) -> Self {
        Self {
            value: AtomicI64::new(value),
        }
    }
}

impl IntPreference for InMemoryIntPreference {
    fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn set(&self, value: i64) -> Result<(), PreferenceError> {
        self.value.store(value, Ordering::Relaxed);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    value: i64,
}

/// Preference stored as a small RON file, read fresh on every `get`.
#[derive(Debug, Clone)]
pub struct RonIntPreference {
    path: PathBuf,
}

impl RonIntPreference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IntPreference for RonIntPreference {
    fn get(&self) -> i64 {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return 0,
            Err(err) => {
                discovery_warn!("Failed to read preference {:?}: {}", self.path, err);
                return 0;
            }
        };
        match ron::from_str::<StoredPreference>(&content) {
            Ok(stored) => stored.value,
            Err(err) => {
                discovery_warn!("Malformed preference {:?}: {}", self.path, err);
                0
            }
        }
    }

    /// Writes a temp file next to the target, then renames it into place.
    fn set(&self, value: i64) -> Result<(), PreferenceError> {
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        if self.path.file_name().is_none() {
            return Err(PreferenceError::InvalidPath(self.path.clone()));
        }

        let content = ron::ser::to_string_pretty(
            &StoredPreference { value },
            ron::ser::PrettyConfig::new(),
        )?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|e| PreferenceError::Io(e.error))?;
        Ok(())
    }
}
