//! Key → JSON blob persistence of the user's last session.
//!
//! Each key is one JSON file in the session directory. Values are written
//! to a temporary file first and renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::types::{ImageDescriptor, RenderOptions};

/// Keys of persisted session values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Last used [`RenderOptions`].
    RenderOptions,
    /// Last (sanitized) input text.
    AlgInput,
    /// Last generated descriptor list.
    Images,
}

impl SessionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::RenderOptions => "render_options",
            SessionKey::AlgInput => "alg_input",
            SessionKey::Images => "images",
        }
    }

    fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

/// Everything the surrounding layer restores on startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub render_options: RenderOptions,
    pub alg_input: String,
    pub images: Vec<ImageDescriptor>,
}

/// File-backed session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: SessionKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Loads a value, returning None if it was never saved.
    pub fn load<T: DeserializeOwned>(&self, key: SessionKey) -> Result<Option<T>> {
        let path = self.path(key);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::session_store_failed(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&data).map(Some).map_err(|e| {
            AppError::session_store_failed(format!("Corrupt session value {}: {}", key.as_str(), e))
        })
    }

    /// Saves a value, replacing any previous one.
    pub fn save<T: Serialize>(&self, key: SessionKey, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::session_store_failed(format!(
                "Failed to create session directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let json = serde_json::to_vec_pretty(value).map_err(|e| {
            AppError::session_store_failed(format!("Failed to encode {}: {}", key.as_str(), e))
        })?;

        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| {
                AppError::session_store_failed(format!("Failed to write {}: {}", path.display(), e))
            })
    }

    /// Removes a value. Removing a missing value is not an error.
    pub fn remove(&self, key: SessionKey) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::session_store_failed(format!(
                "Failed to remove {}: {}",
                key.as_str(),
                e
            ))),
        }
    }

    /// Loads the whole session, falling back to defaults for anything
    /// missing or unreadable.
    pub fn snapshot(&self) -> Session {
        Session {
            render_options: self.load_or_default(SessionKey::RenderOptions),
            alg_input: self.load_or_default(SessionKey::AlgInput),
            images: self.load_or_default(SessionKey::Images),
        }
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: SessionKey) -> T {
        match self.load(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!(key = key.as_str(), error = %e.message, "using default session value");
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TopColor;

    #[test]
    fn missing_values_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session"));
        let value: Option<String> = store.load(SessionKey::AlgInput).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn save_and_load_options() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session"));
        let options = RenderOptions {
            top_color: TopColor::Blue,
            size: 512,
            ..Default::default()
        };

        store.save(SessionKey::RenderOptions, &options).unwrap();
        let loaded: RenderOptions = store.load(SessionKey::RenderOptions).unwrap().unwrap();
        assert_eq!(loaded, options);
        assert!(dir.path().join("session/render_options.json").exists());
    }

    #[test]
    fn corrupt_value_is_an_error_and_snapshot_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(dir.path().join("render_options.json"), b"{not json").unwrap();

        let err = store.load::<RenderOptions>(SessionKey::RenderOptions).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::SessionStoreFailed);

        let session = store.snapshot();
        assert_eq!(session.render_options, RenderOptions::default());
    }

    #[test]
    fn snapshot_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let images = vec![ImageDescriptor::new("R", "https://r/?case=R")];

        store.save(SessionKey::AlgInput, &"R".to_string()).unwrap();
        store.save(SessionKey::Images, &images).unwrap();

        let session = store.snapshot();
        assert_eq!(session.alg_input, "R");
        assert_eq!(session.images, images);

        store.remove(SessionKey::Images).unwrap();
        store.remove(SessionKey::Images).unwrap();
        assert!(store.snapshot().images.is_empty());
    }
}
