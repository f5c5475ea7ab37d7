//! # crossdork-cli
//!
//! Command-line interface for building Shodan, Censys and FOFA queries from
//! one set of fields.
//!
//! ## Features
//!
//! - **Conversion**: `convert` prints every engine's query, fallback and search URL
//! - **Educational mode**: `--explain` shows which engine rules shaped the queries
//! - **Sharing**: `share`/`unshare` turn field sets into compact codes
//! - **Presets**: named field sets stored next to the config
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod output;
pub mod presets;

pub use cli::run;
