//! Web search URLs for finished queries.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::warn;
use url::form_urlencoded;

const SHODAN_SEARCH: &str = "https://www.shodan.io/search?query=";
const CENSYS_SEARCH: &str = "https://platform.censys.io/search?q=";
const FOFA_SEARCH: &str = "https://en.fofa.info/result?qbase64=";

/// Build the web search URL for an engine, or `None` for an unknown id.
///
/// Shodan and Censys take the query percent-encoded. FOFA takes it as
/// standard base64 in `qbase64`, itself percent-encoded.
#[must_use]
pub fn search_url(engine_id: &str, query: &str) -> Option<String> {
    match engine_id {
        "shodan" => Some(format!("{SHODAN_SEARCH}{}", encode(query))),
        "censys" => Some(format!("{CENSYS_SEARCH}{}", encode(query))),
        "fofa" => Some(format!("{FOFA_SEARCH}{}", encode(&STANDARD.encode(query)))),
        _ => {
            warn!(engine = engine_id, "no search URL for unknown engine");
            None
        }
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
