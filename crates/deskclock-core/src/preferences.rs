//! Preference stores backing the world clock city list.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use deskclock_proto::ports::preferences::{PreferenceError, PreferenceStore};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shellexpand::full;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum PreferenceValue {
    Int(i64),
    Text(String),
}

/// In-memory store.
///
/// Reads see pending edits; [`apply`](PreferenceStore::apply) folds them into
/// the committed snapshot. A pending `None` is a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    committed: BTreeMap<String, PreferenceValue>,
    pending:   BTreeMap<String, Option<PreferenceValue>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    fn lookup(&self, key: &str) -> Option<&PreferenceValue> {
        match self.pending.get(key) {
            Some(entry) => entry.as_ref(),
            None => self.committed.get(key),
        }
    }

    fn commit(&mut self) {
        for (key, entry) in std::mem::take(&mut self.pending) {
            match entry {
                Some(value) => {
                    self.committed.insert(key, value);
                }
                None => {
                    self.committed.remove(&key);
                }
            }
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.lookup(key) {
            Some(PreferenceValue::Int(value)) => *value,
            Some(PreferenceValue::Text(_)) => {
                warn!("Preference '{key}' is not an integer");
                default
            }
            None => default,
        }
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.pending
            .insert(key.to_owned(), Some(PreferenceValue::Int(value)));
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            PreferenceValue::Text(value) => Some(value.clone()),
            PreferenceValue::Int(_) => {
                warn!("Preference '{key}' is not a string");
                None
            }
        }
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.pending
            .insert(key.to_owned(), Some(PreferenceValue::Text(value.to_owned())));
    }

    fn remove(&mut self, key: &str) {
        self.pending.insert(key.to_owned(), None);
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: BTreeSet<&String> = self
            .committed
            .keys()
            .filter(|key| !self.pending.contains_key(*key))
            .collect();
        keys.extend(
            self.pending
                .iter()
                .filter_map(|(key, entry)| entry.as_ref().map(|_| key)),
        );

        keys.into_iter().cloned().collect()
    }

    fn apply(&mut self) -> Result<(), PreferenceError> {
        self.commit();
        Ok(())
    }
}

/// Store persisted as a flat TOML table.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
    path:   PathBuf,
    values: MemoryPreferences,
}

impl TomlPreferences {
    /// Open the store at `path`, expanding `~` and environment variables.
    ///
    /// A missing file yields an empty store; it is created on the first
    /// [`apply`](PreferenceStore::apply).
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] when the path cannot be expanded or the
    /// file exists but cannot be read or decoded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let path = expand_path(path.as_ref())?;
        let committed = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|err| PreferenceError::storage(format!("{}: {err}", path.display())))?;
            debug!("Decoding preferences from {path:?}");

            toml::from_str(&content).map_err(|err| PreferenceError::decode(err.to_string()))?
        } else {
            info!("Preferences file {path:?} does not exist yet");
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: MemoryPreferences {
                committed,
                pending: BTreeMap::new(),
            },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn expand_path(path: &Path) -> Result<PathBuf, PreferenceError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|err| PreferenceError::storage(err.to_string()))?;

    Ok(PathBuf::from(expanded.to_string()))
}

impl PreferenceStore for TomlPreferences {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get_int(key, default)
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.values.put_int(key, value);
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get_string(key)
    }

    fn put_string(&mut self, key: &str, value: &str) {
        self.values.put_string(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys()
    }

    fn apply(&mut self) -> Result<(), PreferenceError> {
        self.values.commit();

        let content = toml::to_string(&self.values.committed)
            .map_err(|err| PreferenceError::encode(err.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|err| PreferenceError::storage(format!("{}: {err}", parent.display())))?;
        }

        fs::write(&self.path, content)
            .map_err(|err| PreferenceError::storage(format!("{}: {err}", self.path.display())))?;
        debug!("Preferences written to {:?}", self.path);

        Ok(())
    }
}
