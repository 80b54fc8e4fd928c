//! Settings blobs
//!
//! Two independent flat key/value blobs, each stored as one JSON object
//! under a fixed name: `<dir>/md-legal-theme.json` and
//! `<dir>/md-legal-office.json`. Values must be primitive (string, number,
//! boolean or null). There is no versioning; a missing file is an empty blob.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ListError, Result};

/// The two fixed settings blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKey {
    /// Appearance preferences (theme, sidebar)
    Theme,
    /// Office profile and page preferences
    Office,
}

impl SettingsKey {
    pub const ALL: [SettingsKey; 2] = [SettingsKey::Theme, SettingsKey::Office];

    /// Fixed storage name of the blob
    pub fn storage_name(&self) -> &'static str {
        match self {
            Self::Theme => "md-legal-theme",
            Self::Office => "md-legal-office",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "theme" | "md-legal-theme" => Some(Self::Theme),
            "office" | "settings" | "md-legal-office" => Some(Self::Office),
            _ => None,
        }
    }
}

/// A flat mapping of string keys to primitive values
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsBlob {
    key: SettingsKey,
    values: BTreeMap<String, Value>,
}

impl SettingsBlob {
    pub fn new(key: SettingsKey) -> Self {
        Self {
            key,
            values: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> SettingsKey {
        self.key
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Set a primitive value; arrays and objects are rejected
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ListError::settings("key cannot be empty"));
        }
        if value.is_array() || value.is_object() {
            return Err(ListError::settings(format!(
                "'{}' must be a string, number, boolean or null",
                name
            )));
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Set from raw text: `true`/`false`, numbers and `null` keep their type
    pub fn set_raw(&mut self, name: impl Into<String>, raw: &str) -> Result<()> {
        let value = match serde_json::from_str::<Value>(raw.trim()) {
            Ok(v) if !v.is_array() && !v.is_object() => v,
            _ => Value::String(raw.to_string()),
        };
        self.set(name, value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    fn to_json(&self) -> Value {
        Value::Object(self.values.clone().into_iter().collect())
    }
}

/// Directory-backed storage for the settings blobs
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a blob
    pub fn path_for(&self, key: SettingsKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.storage_name()))
    }

    /// Read a blob; missing file → empty blob
    pub fn load(&self, key: SettingsKey) -> Result<SettingsBlob> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!(blob = key.storage_name(), "settings blob not found, using empty");
            return Ok(SettingsBlob::new(key));
        }

        let content = fs::read_to_string(&path)?;
        let parsed: BTreeMap<String, Value> = serde_json::from_str(&content)
            .map_err(|e| ListError::json(path.display().to_string(), e))?;

        let mut blob = SettingsBlob::new(key);
        for (name, value) in parsed {
            blob.set(name, value)?;
        }
        Ok(blob)
    }

    /// Write a blob, creating the directory if needed
    pub fn save(&self, blob: &SettingsBlob) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(blob.key());
        let json = serde_json::to_string_pretty(&blob.to_json())
            .map_err(|e| ListError::json(blob.key().storage_name(), e))?;
        fs::write(&path, json)?;
        debug!(blob = blob.key().storage_name(), path = %path.display(), "settings saved");
        Ok(())
    }
}
