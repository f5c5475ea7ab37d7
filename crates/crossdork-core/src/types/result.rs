use serde::{Deserialize, Serialize};

/// Query string used when no constraints were supplied.
pub const WILDCARD_QUERY: &str = "*";

/// Output of one engine's conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Query in the engine's grammar; `"*"` when no fields were usable
    pub query: String,

    /// Human-readable notes about decisions made while converting
    #[serde(default)]
    pub notes: Vec<String>,

    /// Shortened query offered when the full one is too complex
    #[serde(default)]
    pub fallback: Option<String>,
}

impl ConversionResult {
    /// Result with a query and no notes.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            notes: Vec::new(),
            fallback: None,
        }
    }

    /// Placeholder carrying only an explanation: empty query, no fallback.
    #[must_use]
    pub fn placeholder(note: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            notes: vec![note.into()],
            fallback: None,
        }
    }

    /// Append a note.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// True when the query is the match-everything wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.query == WILDCARD_QUERY
    }

    /// True when a simplified query is available.
    #[must_use]
    pub const fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Static metadata about a supported search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineDescriptor {
    /// Stable identifier used in requests (`shodan`, `censys`, `fofa`)
    pub id: &'static str,

    /// Display name
    pub name: &'static str,

    /// Query syntax documentation
    pub docs_url: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serialization() {
        let result = ConversionResult::new("port:80");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["query"], "port:80");
        assert!(json["notes"].as_array().unwrap().is_empty());
        assert!(json["fallback"].is_null());
    }

    #[test]
    fn test_placeholder() {
        let result = ConversionResult::placeholder("not implemented");
        assert!(result.query.is_empty());
        assert_eq!(result.notes, vec!["not implemented"]);
        assert!(!result.has_fallback());
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let d = EngineDescriptor {
            id: "shodan",
            name: "Shodan",
            docs_url: "https://example.com",
        };
        let json = serde_json::to_value(d).unwrap();
        assert_eq!(json["docsUrl"], "https://example.com");
    }
}
