//! `crossdork config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", Config::path(&ctx.config_dir).display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.output_format.print_structured(config)? {
        return Ok(());
    }

    println!("{}", "Current Configuration:".bold());
    println!();

    let engines = config
        .default_engines
        .as_ref()
        .map_or_else(|| "(all)".dimmed().to_string(), |e| e.join(","));
    println!("  {} {}", "default_engines:".bold(), engines);
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or(OutputFormat::Pretty)
    );
    println!("  {} {}", "show_tips:".bold(), config.show_tips);
    println!("  {} {}", "show_urls:".bold(), config.show_urls);

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load(&ctx.config_dir)?;
    config.set(key, value)?;

    if let Some(engines) = &config.default_engines {
        let known = ctx.registry.ids();
        if let Some(unknown) = engines.iter().find(|e| !known.contains(&e.as_str())) {
            anyhow::bail!(
                "Unknown engine: {}\nSupported engines: {}",
                unknown,
                known.join(", ")
            );
        }
    }

    config.save(&ctx.config_dir)?;
    println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    Ok(())
}
