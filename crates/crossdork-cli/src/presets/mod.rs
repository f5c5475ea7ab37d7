//! Saved field presets.
//!
//! Presets are named field mappings. Commands talk to a [`PresetStore`];
//! the CLI uses [`FilePresetStore`] (a `presets.toml` next to the config),
//! tests use [`MemoryPresetStore`].

use chrono::{DateTime, Utc};
use crossdork::NormalizedFields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from preset storage.
#[derive(Error, Debug)]
pub enum PresetError {
    /// Preset name is empty or has characters outside `[A-Za-z0-9_-]`
    #[error("invalid preset name: {0:?} (use letters, digits, '-' and '_')")]
    InvalidName(String),

    /// Reading or writing the presets file failed
    #[error("preset file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The presets file is not valid TOML
    #[error("preset file is corrupt: {0}")]
    Parse(#[from] toml::de::Error),

    /// Presets could not be written as TOML
    #[error("could not write presets: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// A saved field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// When the preset was saved
    pub created_at: DateTime<Utc>,

    /// The saved fields
    pub fields: NormalizedFields,
}

/// Key-value storage for presets.
pub trait PresetStore {
    /// Fetch a preset by name.
    fn get(&self, name: &str) -> Result<Option<Preset>, PresetError>;

    /// Save fields under a name, replacing any existing preset.
    fn set(&mut self, name: &str, fields: NormalizedFields) -> Result<(), PresetError>;

    /// All presets, sorted by name.
    fn list(&self) -> Result<Vec<(String, Preset)>, PresetError>;

    /// Remove a preset. Returns false when it did not exist.
    fn delete(&mut self, name: &str) -> Result<bool, PresetError>;
}

fn validate_name(name: &str) -> Result<(), PresetError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PresetError::InvalidName(name.to_string()))
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    presets: BTreeMap<String, Preset>,
}

impl PresetStore for MemoryPresetStore {
    fn get(&self, name: &str) -> Result<Option<Preset>, PresetError> {
        Ok(self.presets.get(name).cloned())
    }

    fn set(&mut self, name: &str, fields: NormalizedFields) -> Result<(), PresetError> {
        validate_name(name)?;
        self.presets.insert(
            name.to_string(),
            Preset {
                created_at: Utc::now(),
                fields,
            },
        );
        Ok(())
    }

    fn list(&self) -> Result<Vec<(String, Preset)>, PresetError> {
        Ok(self
            .presets
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn delete(&mut self, name: &str) -> Result<bool, PresetError> {
        Ok(self.presets.remove(name).is_some())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: BTreeMap<String, Preset>,
}

/// Store backed by a TOML file. Every operation reads the file; writes
/// replace it whole.
#[derive(Debug, Clone)]
pub struct FilePresetStore {
    path: PathBuf,
}

impl FilePresetStore {
    /// Store at `<dir>/presets.toml`. The file is created on first write.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join("presets.toml"),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<PresetFile, PresetError> {
        if !self.path.exists() {
            return Ok(PresetFile::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn write(&self, file: &PresetFile) -> Result<(), PresetError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(file)?)?;
        Ok(())
    }
}

impl PresetStore for FilePresetStore {
    fn get(&self, name: &str) -> Result<Option<Preset>, PresetError> {
        Ok(self.read()?.presets.remove(name))
    }

    fn set(&mut self, name: &str, fields: NormalizedFields) -> Result<(), PresetError> {
        validate_name(name)?;
        let mut file = self.read()?;
        file.presets.insert(
            name.to_string(),
            Preset {
                created_at: Utc::now(),
                fields,
            },
        );
        self.write(&file)
    }

    fn list(&self) -> Result<Vec<(String, Preset)>, PresetError> {
        Ok(self.read()?.presets.into_iter().collect())
    }

    fn delete(&mut self, name: &str) -> Result<bool, PresetError> {
        let mut file = self.read()?;
        let removed = file.presets.remove(name).is_some();
        if removed {
            self.write(&file)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossdork::Field;

    fn sample() -> NormalizedFields {
        NormalizedFields::new()
            .with(Field::Port, vec![80, 443])
            .with(Field::Title, "Admin \"panel\"")
            .with(Field::ExpiredCert, true)
    }

    fn exercise(store: &mut dyn PresetStore) {
        assert!(store.get("web").unwrap().is_none());

        store.set("web", sample()).unwrap();
        store.set("ssh-hosts", NormalizedFields::new().with(Field::Port, 22)).unwrap();

        let web = store.get("web").unwrap().unwrap();
        assert_eq!(web.fields, sample());

        let names: Vec<String> = store.list().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ssh-hosts", "web"]);

        assert!(store.delete("web").unwrap());
        assert!(!store.delete("web").unwrap());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_memory_store() {
        exercise(&mut MemoryPresetStore::default());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilePresetStore::in_dir(dir.path());
        exercise(&mut store);
        assert!(store.path().exists());

        // a fresh handle sees what the first one wrote
        let reopened = FilePresetStore::in_dir(dir.path());
        assert_eq!(reopened.list().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_names() {
        let mut store = MemoryPresetStore::default();
        for name in ["", "has space", "semi;colon", "dot.name"] {
            assert!(matches!(
                store.set(name, NormalizedFields::new()),
                Err(PresetError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("presets.toml"), "presets = [").unwrap();
        let store = FilePresetStore::in_dir(dir.path());
        assert!(matches!(store.list(), Err(PresetError::Parse(_))));
    }
}
