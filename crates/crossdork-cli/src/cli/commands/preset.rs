//! `crossdork preset` - Saved field presets.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::share::print_fields;
use super::{load_fields, Context};
use crate::cli::args::{PresetArgs, PresetCommands};
use crate::output::OutputFormat;
use crate::presets::PresetStore;

#[derive(Serialize, Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Fields")]
    fields: usize,
    #[tabled(rename = "Saved")]
    created_at: String,
}

pub fn execute(ctx: &Context, args: PresetArgs) -> Result<()> {
    let mut store = ctx.presets();

    match args.command {
        PresetCommands::Save { name, input } => {
            let fields = load_fields(&input, &store)?;
            if fields.is_empty() {
                anyhow::bail!("No fields given. Use -f KEY=VALUE, --json, --file or --share");
            }
            store.set(&name, fields)?;
            if ctx.output_format == OutputFormat::Pretty {
                println!("{} Preset {} saved.", "Success:".green().bold(), name.cyan());
            }
        }
        PresetCommands::List => {
            let rows: Vec<PresetRow> = store
                .list()?
                .into_iter()
                .map(|(name, preset)| PresetRow {
                    name,
                    fields: preset.fields.len(),
                    created_at: preset.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                })
                .collect();

            if ctx.output_format.print_structured(&rows)? {
                return Ok(());
            }
            if ctx.output_format == OutputFormat::Csv {
                let mut writer = csv::Writer::from_writer(std::io::stdout());
                for row in &rows {
                    writer.serialize(row)?;
                }
                writer.flush()?;
            } else if rows.is_empty() {
                println!("{}", "No presets saved yet.".dimmed());
                if ctx.config.show_tips {
                    println!(
                        "{}",
                        "Tip: crossdork preset save web -f port=80 -f port=443".dimmed()
                    );
                }
            } else {
                println!("{}", Table::new(&rows).with(Style::rounded()));
            }
        }
        PresetCommands::Show { name } => {
            let preset = store
                .get(&name)?
                .ok_or_else(|| anyhow::anyhow!("No preset named '{name}'"))?;
            print_fields(ctx, &preset.fields)?;
        }
        PresetCommands::Delete { name } => {
            if !store.delete(&name)? {
                anyhow::bail!("No preset named '{name}'");
            }
            if ctx.output_format == OutputFormat::Pretty {
                println!("{} Preset {} deleted.", "Success:".green().bold(), name.cyan());
            }
        }
    }

    Ok(())
}
