//! `crossdork url` - Web search URL for a finished query.

use anyhow::Result;
use crossdork::search_url;
use serde_json::json;

use super::Context;
use crate::cli::args::UrlArgs;

pub fn execute(ctx: &Context, args: &UrlArgs) -> Result<()> {
    let url = search_url(&args.engine, &args.query).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown engine: {}\nSupported engines: {}",
            args.engine,
            ctx.registry.ids().join(", ")
        )
    })?;

    let value = json!({ "engine": args.engine, "url": url });
    if !ctx.output_format.print_structured(&value)? {
        println!("{url}");
    }
    Ok(())
}
