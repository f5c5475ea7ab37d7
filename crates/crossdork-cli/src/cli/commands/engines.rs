//! `crossdork engines` - List supported engines.

use anyhow::Result;
use colored::Colorize;
use crossdork::api::EngineListing;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::output::OutputFormat;

#[derive(Tabled)]
struct EngineRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Query Docs")]
    docs: &'static str,
}

pub fn execute(ctx: &Context) -> Result<()> {
    let listing = EngineListing::from_registry(&ctx.registry);

    if ctx.output_format.print_structured(&listing)? {
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Csv {
        let mut writer = csv::Writer::from_writer(std::io::stdout());
        writer.write_record(["id", "name", "docs_url"])?;
        for engine in &listing.engines {
            writer.write_record([engine.id, engine.name, engine.docs_url])?;
        }
        writer.flush()?;
        return Ok(());
    }

    let rows: Vec<EngineRow> = listing
        .engines
        .iter()
        .map(|e| EngineRow {
            id: e.id,
            name: e.name,
            docs: e.docs_url,
        })
        .collect();

    println!("{}", Table::new(&rows).with(Style::rounded()));
    println!();
    println!("{} {}", "Total:".bold(), listing.total.to_string().cyan());
    if ctx.config.show_tips {
        println!(
            "{}",
            "Tip: Pick engines with 'crossdork convert -e shodan -e fofa ...'".dimmed()
        );
    }
    Ok(())
}
