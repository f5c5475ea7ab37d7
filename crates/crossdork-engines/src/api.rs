//! Request/response shapes for a thin HTTP or RPC adapter.
//!
//! ```text
//! POST /convert   { "fields": {...}, "engines": ["shodan", "fofa"] }
//!              -> { "shodan": {query, notes, fallback}, "fofa": {...} }
//! GET  /engines   -> { "engines": [...], "total": 3 }
//! ```
//!
//! Shape checks happen here, before the registry sees anything; a failed
//! check is a client error ([`QueryError::is_client_error`]).

use crate::Registry;
use crossdork_core::{ConversionResult, EngineDescriptor, NormalizedFields, QueryError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    /// Field mapping to convert
    pub fields: NormalizedFields,
    /// Requested engine ids, in request order
    pub engines: Vec<String>,
}

impl ConvertRequest {
    /// Validate a raw JSON body.
    pub fn from_json(body: &Value) -> Result<Self> {
        let Value::Object(body) = body else {
            return Err(QueryError::InvalidRequest("body must be an object".into()));
        };

        let fields = match body.get("fields") {
            Some(value @ Value::Object(_)) => NormalizedFields::from_json(value)?,
            Some(_) => return Err(QueryError::InvalidRequest("fields must be an object".into())),
            None => return Err(QueryError::InvalidRequest("missing fields".into())),
        };

        let engines = match body.get("engines") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        QueryError::InvalidRequest("engines must contain only strings".into())
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(QueryError::InvalidRequest("engines must be an array".into())),
            None => return Err(QueryError::InvalidRequest("missing engines".into())),
        };

        Ok(Self { fields, engines })
    }

    /// Run the request against a registry.
    #[must_use]
    pub fn execute(&self, registry: &Registry) -> BTreeMap<String, ConversionResult> {
        registry.convert_all(&self.fields, &self.engines)
    }
}

/// Validate and run a raw conversion request.
pub fn convert_request(
    registry: &Registry,
    body: &Value,
) -> Result<BTreeMap<String, ConversionResult>> {
    Ok(ConvertRequest::from_json(body)?.execute(registry))
}

/// Engine listing response.
#[derive(Debug, Clone, Serialize)]
pub struct EngineListing {
    /// Supported engines, in display order
    pub engines: Vec<EngineDescriptor>,
    /// Number of engines
    pub total: usize,
}

impl EngineListing {
    /// Listing for a registry.
    #[must_use]
    pub fn from_registry(registry: &Registry) -> Self {
        let engines = registry.engines();
        Self {
            total: engines.len(),
            engines,
        }
    }
}
