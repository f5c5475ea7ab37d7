//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Build Shodan, Censys and FOFA queries from one set of fields
///
/// Describe what you are looking for once (ports, ASN, TLS names, titles...)
/// and get the matching query for every engine.
/// Use --explain on convert to see which engine quirks applied.
#[derive(Parser, Debug)]
#[command(name = "crossdork")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding config.toml and presets.toml
    #[arg(long, env = "CROSSDORK_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert fields into engine queries
    Convert(ConvertArgs),

    /// List supported engines
    Engines,

    /// List the field vocabulary and per-engine support
    Fields,

    /// Print the web search URL for a query
    Url(UrlArgs),

    /// Encode fields as a compact share code
    Share(ShareArgs),

    /// Decode a share code back into fields
    Unshare(UnshareArgs),

    /// Manage saved field presets
    Preset(PresetArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Field input shared by convert, share and preset save
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct FieldInput {
    /// Field as key=value; repeat a key to search for several values
    /// (e.g. -f port=80 -f port=443 -f country=DE)
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Fields as a JSON object (e.g. '{"port":[80,443]}')
    #[arg(long, conflicts_with_all = ["file", "preset", "share"])]
    pub json: Option<String>,

    /// Read fields from a JSON file
    #[arg(long, conflicts_with_all = ["preset", "share"])]
    pub file: Option<PathBuf>,

    /// Start from a saved preset
    #[arg(long, conflicts_with = "share")]
    pub preset: Option<String>,

    /// Start from a share code
    #[arg(long)]
    pub share: Option<String>,
}

// ============================================================================
// Convert command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: FieldInput,

    /// Engines to convert for (default: config default_engines, else all)
    #[arg(short, long = "engine", value_name = "ENGINE")]
    pub engines: Vec<String>,

    /// Open the search URLs in a browser
    #[arg(long)]
    pub open: bool,

    /// Explain which engine-specific rules applied
    #[arg(long)]
    pub explain: bool,
}

// ============================================================================
// Url command
// ============================================================================

#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Engine id (shodan, censys, fofa)
    pub engine: String,

    /// Finished query string
    pub query: String,
}

// ============================================================================
// Share commands
// ============================================================================

#[derive(Args, Debug)]
pub struct ShareArgs {
    #[command(flatten)]
    pub input: FieldInput,
}

#[derive(Args, Debug)]
pub struct UnshareArgs {
    /// Share code (URL-safe or legacy padded base64)
    pub code: String,
}

// ============================================================================
// Preset command
// ============================================================================

#[derive(Args, Debug)]
pub struct PresetArgs {
    #[command(subcommand)]
    pub command: PresetCommands,
}

#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// Save fields under a name
    Save {
        /// Preset name (letters, digits, '-' and '_')
        name: String,

        #[command(flatten)]
        input: FieldInput,
    },

    /// List saved presets
    List,

    /// Show a preset's fields
    Show {
        /// Preset name
        name: String,
    },

    /// Delete a preset
    Delete {
        /// Preset name
        name: String,
    },
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., default_engines, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
