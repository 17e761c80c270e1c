//! Light/dark theme and its persistence
//!
//! The widget reads its theme once at mount and writes it back on every
//! toggle. Storage sits behind [`PreferenceStore`] so the browser's
//! `localStorage`, a JSON file, or an in-memory map can back it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for preference storage
pub type StoreResult<T> = Result<T, StoreError>;

/// Preference storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed preference file
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backing storage refused the operation (quota, privacy mode)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Stored value (`"light"` or `"dark"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored value; only `"dark"` and `"light"` are recognized
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns true for the dark theme
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Glyph shown on the toggle button (the theme it switches to)
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Dark => "☀",
            Self::Light => "☾",
        }
    }

    /// Loads the persisted theme
    ///
    /// `key` wins over `legacy_key`; a missing or empty value falls through.
    /// Anything other than `"dark"` means light. Read failures are treated as
    /// missing values.
    pub fn load<P: PreferenceStore + ?Sized>(store: &P, key: &str, legacy_key: &str) -> Self {
        let read = |k: &str| match store.get(k) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                tracing::warn!(key = k, %err, "failed to read theme preference");
                None
            }
        };

        read(key)
            .or_else(|| read(legacy_key))
            .as_deref()
            .and_then(Self::parse)
            .unwrap_or(Self::Light)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value preference storage
pub trait PreferenceStore {
    /// Reads a value
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory store, used by tests and the mock DOM driver
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with one value
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Returns the stored value without going through the trait
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in a file
///
/// A missing file reads as empty; every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path` (created on first write)
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StoreResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}
