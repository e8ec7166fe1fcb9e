//! Persistence of user preferences and sessions in a key-value store.
//!
//! Reading never fails: a missing or unreadable entry is reported as absent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::file_types::FileTypeGroup;
use crate::rule::ExtensionRules;
use crate::store::RuleStore;

pub const PREFERENCES_KEY: &str = "botblock-preferences";
pub const SESSION_KEY: &str = "botblock-session";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

pub trait KvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

/// Stores each key as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.key_path(key).ok()?;
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Couldn't read {}: {e}", path.display());
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore(HashMap<String, Vec<u8>>);

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.0.insert(key.to_string(), value);
        Ok(())
    }
}

/// The part of the configuration that outlives a sitemap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub extension_rules: ExtensionRules,
    pub blocked_crawlers: Vec<String>,
    pub file_groups: Vec<FileTypeGroup>,
}

impl Preferences {
    pub fn capture(store: &RuleStore) -> Self {
        Self {
            extension_rules: store.extension_rules.clone(),
            blocked_crawlers: store.blocked_crawlers.iter().cloned().collect(),
            file_groups: store.file_groups.clone(),
        }
    }

    pub fn load<K: KvStore + ?Sized>(kv: &K) -> Option<Self> {
        load_json(kv, PREFERENCES_KEY)
    }

    pub fn save<K: KvStore + ?Sized>(&self, kv: &mut K) -> Result<(), StoreError> {
        save_json(kv, PREFERENCES_KEY, self)
    }

    /// Overwrites the matching parts of `store`.
    ///
    /// An empty group list keeps the store's groups.
    pub fn restore(self, mut store: RuleStore) -> RuleStore {
        store.extension_rules = self.extension_rules;
        store.blocked_crawlers = self.blocked_crawlers.into_iter().collect();
        if !self.file_groups.is_empty() {
            store.file_groups = self.file_groups;
        }
        store
    }
}

pub fn load_session<K: KvStore + ?Sized>(kv: &K) -> Option<RuleStore> {
    load_json(kv, SESSION_KEY)
}

pub fn save_session<K: KvStore + ?Sized>(kv: &mut K, store: &RuleStore) -> Result<(), StoreError> {
    save_json(kv, SESSION_KEY, store)
}

fn load_json<K, T>(kv: &K, key: &str) -> Option<T>
where
    K: KvStore + ?Sized,
    T: DeserializeOwned,
{
    let bytes = kv.get(key)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| log::warn!("Ignoring unreadable {key}: {e}"))
        .ok()
}

fn save_json<K, T>(kv: &mut K, key: &str, value: &T) -> Result<(), StoreError>
where
    K: KvStore + ?Sized,
    T: Serialize,
{
    let bytes = serde_json::to_vec_pretty(value)?;
    kv.set(key, bytes)
}
