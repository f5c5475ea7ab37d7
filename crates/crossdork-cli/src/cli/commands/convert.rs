//! `crossdork convert` - Build engine queries from fields.

use anyhow::Result;
use colored::Colorize;
use crossdork::{search_url, ConversionResult};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::{load_fields, Context};
use crate::cli::args::ConvertArgs;
use crate::education::Explain;
use crate::output::OutputFormat;

#[derive(Serialize)]
struct CsvRow<'a> {
    engine: &'a str,
    query: &'a str,
    fallback: &'a str,
    url: String,
    notes: String,
}

pub fn execute(ctx: &Context, args: ConvertArgs) -> Result<()> {
    let fields = load_fields(&args.input, &ctx.presets())?;

    let mut engines = if args.engines.is_empty() {
        ctx.default_engines()
    } else {
        args.engines
    };
    let mut seen = std::collections::HashSet::new();
    engines.retain(|id| seen.insert(id.clone()));
    debug!(?engines, fields = fields.len(), "converting");

    let results = ctx.registry.convert_all(&fields, &engines);

    if args.explain && ctx.output_format == OutputFormat::Pretty {
        Explain::convert(&fields, &ctx.registry, &results).print();
    }

    if !ctx.output_format.print_structured(&results)? {
        match ctx.output_format {
            OutputFormat::Csv => print_csv(&engines, &results)?,
            _ => print_pretty(ctx, &engines, &results),
        }
    }

    if args.open {
        open_urls(&engines, &results);
    }

    Ok(())
}

fn print_csv(engines: &[String], results: &BTreeMap<String, ConversionResult>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for id in engines {
        let Some(result) = results.get(id) else { continue };
        writer.serialize(CsvRow {
            engine: id,
            query: &result.query,
            fallback: result.fallback.as_deref().unwrap_or(""),
            url: search_url(id, &result.query).unwrap_or_default(),
            notes: result.notes.join("; "),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn print_pretty(ctx: &Context, engines: &[String], results: &BTreeMap<String, ConversionResult>) {
    for id in engines {
        let Some(result) = results.get(id) else { continue };
        let name = ctx
            .registry
            .get(id)
            .map_or_else(|| id.clone(), |c| c.descriptor().name.to_string());

        println!("{}", name.bold().underline());
        if result.query.is_empty() {
            println!("  {}", "(no query)".dimmed());
        } else {
            println!("  {}", result.query.green());
        }

        if let Some(fallback) = &result.fallback {
            println!("  {} {}", "Fallback:".bold(), fallback.yellow());
        }

        for note in &result.notes {
            println!("  {} {}", "-".dimmed(), note.dimmed());
        }

        if ctx.config.show_urls && !result.query.is_empty() {
            if let Some(url) = search_url(id, &result.query) {
                println!("  {} {}", "URL:".bold(), url.cyan());
            }
        }
        println!();
    }

    if ctx.config.show_tips {
        println!("{}", "Tip: Add --explain to see which engine rules applied".dimmed());
        println!("{}", "Tip: Run 'crossdork share' with the same fields to get a share code".dimmed());
    }
}

fn open_urls(engines: &[String], results: &BTreeMap<String, ConversionResult>) {
    for id in engines {
        let Some(result) = results.get(id) else { continue };
        if result.query.is_empty() {
            continue;
        }
        let Some(url) = search_url(id, &result.query) else { continue };
        if let Err(e) = open::that(&url) {
            warn!(engine = %id, error = %e, "could not open browser");
        }
    }
}
