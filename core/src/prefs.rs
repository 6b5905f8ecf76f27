//! Durable key-value preferences backed by a JSON file.
//!
//! # Design
//! The file holds one JSON object mapping each key to a JSON-encoded string,
//! and every value is decoded on its own, so a single damaged value cannot
//! take the others down with it. Reads never fail: an absent, unreadable or
//! undecodable value is logged and the caller's default is returned.
//!
//! Writes never discard what they cannot parse. A file that is not a JSON
//! object is left in place and the write fails with
//! [`PreferenceError::Unreadable`]. The new contents go to a temporary file in
//! the same directory which is then renamed over the original.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::PreferenceError;

const APP_PREFIX: &str = "holiday";
const FILE_NAME: &str = "preferences.json";

type Entries = BTreeMap<String, Value>;

/// Named preference values persisted to a single file.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Preferences at `$XDG_CONFIG_HOME/holiday/preferences.json`.
    pub fn default_location() -> Result<Self, PreferenceError> {
        let path = xdg::BaseDirectories::with_prefix(APP_PREFIX)
            .place_config_file(FILE_NAME)
            .map_err(|e| PreferenceError::XdgDirectory(e.to_string()))?;
        Ok(Self::open(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the value stored under `key`, or return `default`.
    ///
    /// A value stored as plain JSON rather than an encoded string (a hand
    /// edit, usually) is decoded as it stands.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(stored) = self.load().remove(key) else {
            return default;
        };
        let decoded = match stored {
            Value::String(raw) => serde_json::from_str(&raw),
            other => serde_json::from_value(other),
        };
        match decoded {
            Ok(value) => value,
            Err(e) => {
                warn!("Error parsing preference value for key '{key}': {e}");
                default
            }
        }
    }

    /// Raw JSON text stored under `key`.
    pub fn read_raw(&self, key: &str) -> Option<String> {
        self.load().remove(key).map(|stored| match stored {
            Value::String(raw) => raw,
            other => other.to_string(),
        })
    }

    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), PreferenceError> {
        let encoded = serde_json::to_string(value).map_err(|source| PreferenceError::Encode {
            key: key.to_string(),
            source,
        })?;
        let mut entries = self.load_for_update()?;
        entries.insert(key.to_string(), Value::String(encoded));
        self.store(&entries)
    }

    /// Remove `key`. Returns whether a value was stored.
    pub fn remove(&self, key: &str) -> Result<bool, PreferenceError> {
        let mut entries = self.load_for_update()?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.store(&entries)?;
        Ok(true)
    }

    fn load(&self) -> Entries {
        self.load_for_update().unwrap_or_else(|e| {
            warn!("Error loading preferences: {e}");
            Entries::new()
        })
    }

    fn load_for_update(&self) -> Result<Entries, PreferenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(source) => {
                return Err(PreferenceError::FileSystem {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| PreferenceError::Unreadable {
            path: self.path.clone(),
            source,
        })
    }

    fn store(&self, entries: &Entries) -> Result<(), PreferenceError> {
        let fs_err = |source| PreferenceError::FileSystem {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(fs_err)?;

        let text = serde_json::to_string_pretty(entries).map_err(|source| PreferenceError::Encode {
            key: String::new(),
            source,
        })?;
        let mut file = NamedTempFile::new_in(dir).map_err(fs_err)?;
        file.write_all(text.as_bytes()).map_err(fs_err)?;
        file.persist(&self.path).map_err(|e| fs_err(e.error))?;
        Ok(())
    }
}
