//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use crossdork::Registry;
use tracing_subscriber::EnvFilter;

use crate::config::{config_dir, Config};
use crate::output::OutputFormat;

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_dir = config_dir(cli.config_dir.as_deref())?;
    let config = Config::load(&config_dir)?;

    // Determine output format: flag, then config, then pretty
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Create context for commands
    let ctx = commands::Context {
        output_format,
        config,
        config_dir,
        registry: Registry::new(),
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Convert(args) => commands::convert::execute(&ctx, args),
        Commands::Engines => commands::engines::execute(&ctx),
        Commands::Fields => commands::fields::execute(&ctx),
        Commands::Url(args) => commands::url::execute(&ctx, &args),
        Commands::Share(args) => commands::share::share(&ctx, &args),
        Commands::Unshare(args) => commands::share::unshare(&ctx, &args),
        Commands::Preset(args) => commands::preset::execute(&ctx, args),
        Commands::Config(args) => commands::config::execute(&ctx, args),
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with
/// `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
