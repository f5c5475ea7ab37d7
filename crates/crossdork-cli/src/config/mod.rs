//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Engines used when `convert` gets no `--engine`.
    #[serde(default)]
    pub default_engines: Option<Vec<String>>,

    /// Default output format.
    #[serde(default)]
    pub output_format: Option<OutputFormat>,

    /// Show helpful tips after commands.
    #[serde(default = "default_true")]
    pub show_tips: bool,

    /// Print search URLs next to queries.
    #[serde(default = "default_true")]
    pub show_urls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_engines: None,
            output_format: None,
            show_tips: true,
            show_urls: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Resolve the directory holding `config.toml` and `presets.toml`.
pub fn config_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    let dirs = ProjectDirs::from("is", "i1", "crossdork")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().to_path_buf())
}

impl Config {
    /// Get the config file path inside a config directory.
    pub fn path(dir: &Path) -> PathBuf {
        dir.join("config.toml")
    }

    /// Load configuration from file, falling back to defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path(dir);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::path(dir);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Set a key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_engines" | "engines" => {
                let engines: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                self.default_engines = (!engines.is_empty()).then_some(engines);
            }
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "show_tips" => self.show_tips = value.parse()?,
            "show_urls" => self.show_urls = value.parse()?,
            _ => anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 default_engines  - Comma-separated engine ids (shodan,censys,fofa)\n  \
                 output_format    - Default output format (pretty/json/csv/yaml)\n  \
                 show_tips        - Show helpful tips (true/false)\n  \
                 show_urls        - Print search URLs with queries (true/false)",
                key
            ),
        }
        Ok(())
    }
}
