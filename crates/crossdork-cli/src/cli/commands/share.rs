//! `crossdork share` / `crossdork unshare` - Compact share codes.

use anyhow::{Context as _, Result};
use colored::Colorize;
use crossdork::codec::{decode_fields, encode_fields};
use crossdork::NormalizedFields;
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};

use super::{load_fields, Context};
use crate::cli::args::{ShareArgs, UnshareArgs};
use crate::output::OutputFormat;

#[derive(Tabled)]
struct FieldEntry {
    #[tabled(rename = "Field")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn share(ctx: &Context, args: &ShareArgs) -> Result<()> {
    let fields = load_fields(&args.input, &ctx.presets())?;
    let code = encode_fields(&fields)?;

    if ctx.output_format.print_structured(&json!({ "code": code }))? {
        return Ok(());
    }

    println!("{code}");
    if ctx.output_format == OutputFormat::Pretty && ctx.config.show_tips {
        println!();
        println!(
            "{}",
            format!("Tip: Rebuild the queries with 'crossdork convert --share {code}'").dimmed()
        );
    }
    Ok(())
}

pub fn unshare(ctx: &Context, args: &UnshareArgs) -> Result<()> {
    let fields = decode_fields(&args.code).context("Invalid share code")?;
    print_fields(ctx, &fields)
}

/// Print a field mapping in the selected format.
pub fn print_fields(ctx: &Context, fields: &NormalizedFields) -> Result<()> {
    if ctx.output_format.print_structured(fields)? {
        return Ok(());
    }

    let entries: Vec<FieldEntry> = fields
        .iter()
        .map(|(key, value)| FieldEntry {
            key: key.to_string(),
            value: value.values().join(", "),
        })
        .collect();

    if ctx.output_format == OutputFormat::Csv {
        let mut writer = csv::Writer::from_writer(std::io::stdout());
        writer.write_record(["field", "value"])?;
        for entry in &entries {
            writer.write_record([&entry.key, &entry.value])?;
        }
        writer.flush()?;
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "(no fields)".dimmed());
    } else {
        println!("{}", Table::new(&entries).with(Style::rounded()));
    }
    Ok(())
}
