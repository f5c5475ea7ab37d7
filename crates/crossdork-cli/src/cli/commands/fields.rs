//! `crossdork fields` - The field vocabulary and which engines use each field.

use anyhow::Result;
use crossdork::clause::ClauseRule;
use crossdork::{censys, fofa, shodan, Field};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::output::OutputFormat;

#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Shodan", display_with = "mark")]
    shodan: bool,
    #[tabled(rename = "Censys", display_with = "mark")]
    censys: bool,
    #[tabled(rename = "FOFA", display_with = "mark")]
    fofa: bool,
    #[tabled(skip)]
    displayable: bool,
}

fn mark(supported: &bool) -> String {
    if *supported { "yes" } else { "-" }.to_string()
}

fn in_table(rules: &[ClauseRule], field: Field) -> bool {
    rules.iter().any(|rule| rule.field == field)
}

fn rows() -> Vec<FieldRow> {
    Field::ALL
        .into_iter()
        .map(|field| FieldRow {
            name: field.name(),
            label: field.label(),
            shodan: in_table(shodan::RULES, field),
            censys: in_table(censys::RULES, field),
            // fofaCountry reuses the country templates
            fofa: in_table(fofa::RULES, field) || field == Field::FofaCountry,
            displayable: field.is_displayable(),
        })
        .collect()
}

pub fn execute(ctx: &Context) -> Result<()> {
    let rows = rows();

    if ctx.output_format.print_structured(&rows)? {
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Csv {
        let mut writer = csv::Writer::from_writer(std::io::stdout());
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        return Ok(());
    }

    println!("{}", Table::new(&rows).with(Style::rounded()));
    Ok(())
}
