//! Command implementations.

pub mod config;
pub mod convert;
pub mod engines;
pub mod fields;
pub mod preset;
pub mod share;
pub mod url;

use anyhow::{Context as _, Result};
use crossdork::codec::decode_fields;
use crossdork::{Field, NormalizedFields, Registry, Scalar};
use std::path::PathBuf;

use crate::cli::args::FieldInput;
use crate::config::Config;
use crate::output::OutputFormat;
use crate::presets::{FilePresetStore, PresetStore};

/// Shared context for all commands.
#[derive(Debug)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Loaded configuration
    pub config: Config,

    /// Directory holding config.toml and presets.toml
    pub config_dir: PathBuf,

    /// Engines available to commands
    pub registry: Registry,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Preset store inside the config directory.
    pub fn presets(&self) -> FilePresetStore {
        FilePresetStore::in_dir(&self.config_dir)
    }

    /// Engines to use when the user named none.
    pub fn default_engines(&self) -> Vec<String> {
        match &self.config.default_engines {
            Some(engines) if !engines.is_empty() => engines.clone(),
            _ => self.registry.ids().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Assemble the field mapping from a base source (JSON, file, preset or
/// share code) overlaid with repeated `-f key=value` flags.
pub fn load_fields(input: &FieldInput, presets: &dyn PresetStore) -> Result<NormalizedFields> {
    let mut fields = if let Some(json) = &input.json {
        parse_json_fields(json).context("Invalid --json fields")?
    } else if let Some(path) = &input.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        parse_json_fields(&content).with_context(|| format!("Invalid fields in {}", path.display()))?
    } else if let Some(name) = &input.preset {
        presets
            .get(name)?
            .map(|preset| preset.fields)
            .ok_or_else(|| anyhow::anyhow!("No preset named '{name}'. List them with: crossdork preset list"))?
    } else if let Some(code) = &input.share {
        decode_fields(code).context("Invalid share code")?
    } else {
        NormalizedFields::new()
    };

    let mut overlay = NormalizedFields::new();
    for raw in &input.fields {
        let (key, value) = parse_pair(raw)?;
        overlay.push(key.name(), Scalar::parse_loose(value));
    }
    for (key, value) in overlay.iter() {
        if let Some(field) = Field::from_name(key) {
            fields.set(field, value.clone());
        }
    }

    Ok(fields)
}

fn parse_json_fields(raw: &str) -> Result<NormalizedFields> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    Ok(NormalizedFields::from_json(&value)?)
}

/// Split `key=value` and check the key against the field vocabulary.
fn parse_pair(raw: &str) -> Result<(Field, &str)> {
    let Some((key, value)) = raw.split_once('=') else {
        anyhow::bail!("Expected KEY=VALUE, got '{raw}'");
    };
    let key = key.trim();
    let field = Field::from_name(key).ok_or_else(|| {
        anyhow::anyhow!("Unknown field '{key}'. See the full list with: crossdork fields")
    })?;
    Ok((field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::MemoryPresetStore;

    fn input() -> FieldInput {
        FieldInput::default()
    }

    #[test]
    fn test_repeated_flags_become_a_list() {
        let mut args = input();
        args.fields = vec!["port=80".into(), "port=443".into(), "country=DE".into()];
        let fields = load_fields(&args, &MemoryPresetStore::default()).unwrap();
        assert_eq!(fields.values(Field::Port), vec!["80", "443"]);
        assert_eq!(fields.values(Field::Country), vec!["DE"]);
    }

    #[test]
    fn test_flags_override_json() {
        let mut args = input();
        args.json = Some(r#"{"port": [80, 443], "org": "Acme"}"#.into());
        args.fields = vec!["port=22".into()];
        let fields = load_fields(&args, &MemoryPresetStore::default()).unwrap();
        assert_eq!(fields.values(Field::Port), vec!["22"]);
        assert_eq!(fields.values(Field::Org), vec!["Acme"]);
    }

    #[test]
    fn test_unknown_flag_key() {
        let mut args = input();
        args.fields = vec!["colour=red".into()];
        let err = load_fields(&args, &MemoryPresetStore::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown field 'colour'"));

        args.fields = vec!["port".into()];
        assert!(load_fields(&args, &MemoryPresetStore::default()).is_err());
    }

    #[test]
    fn test_preset_source() {
        let mut store = MemoryPresetStore::default();
        store
            .set("cf", NormalizedFields::new().with(Field::Asn, "AS13335"))
            .unwrap();

        let mut args = input();
        args.preset = Some("cf".into());
        let fields = load_fields(&args, &store).unwrap();
        assert_eq!(fields.values(Field::Asn), vec!["AS13335"]);

        args.preset = Some("missing".into());
        assert!(load_fields(&args, &store).is_err());
    }

    #[test]
    fn test_share_source() {
        let mut args = input();
        args.share = Some("eyJwb3J0IjpbODAsNDQzXX0".into());
        let fields = load_fields(&args, &MemoryPresetStore::default()).unwrap();
        assert_eq!(fields.values(Field::Port), vec!["80", "443"]);
    }

    #[test]
    fn test_non_object_json() {
        let mut args = input();
        args.json = Some("[1, 2]".into());
        assert!(load_fields(&args, &MemoryPresetStore::default()).is_err());
    }
}
