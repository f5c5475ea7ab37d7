//! Converter registry: engine listing and isolated dispatch.

use crate::censys::CensysConverter;
use crate::fofa::FofaConverter;
use crate::shodan::ShodanConverter;
use crate::Converter;
use crossdork_core::{ConversionResult, EngineDescriptor, NormalizedFields};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Holds the known converters and fans a field mapping out to them.
pub struct Registry {
    converters: Vec<Box<dyn Converter>>,
}

impl Registry {
    /// Registry with no converters.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// Registry with Shodan, Censys and FOFA, in that order.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ShodanConverter);
        registry.register(CensysConverter);
        registry.register(FofaConverter);
        registry
    }

    /// Add a converter, replacing any existing one with the same id.
    pub fn register(&mut self, converter: impl Converter + 'static) {
        let id = converter.descriptor().id;
        if let Some(slot) = self.converters.iter_mut().find(|c| c.descriptor().id == id) {
            *slot = Box::new(converter);
        } else {
            self.converters.push(Box::new(converter));
        }
    }

    /// Descriptors of the registered engines, in registration order.
    #[must_use]
    pub fn engines(&self) -> Vec<EngineDescriptor> {
        self.converters.iter().map(|c| c.descriptor()).collect()
    }

    /// Ids of the registered engines.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.descriptor().id).collect()
    }

    /// Look up a converter by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Converter> {
        self.converters
            .iter()
            .find(|c| c.descriptor().id == id)
            .map(|c| &**c)
    }

    /// Convert for one engine. Unknown ids and converter errors become a
    /// result with an explanatory note; this never fails.
    #[must_use]
    pub fn convert(&self, fields: &NormalizedFields, id: &str) -> ConversionResult {
        let Some(converter) = self.get(id) else {
            debug!(engine = id, "no converter registered");
            return ConversionResult::placeholder(format!(
                "Converter for '{id}' is not implemented"
            ));
        };

        match converter.convert(fields) {
            Ok(result) => result,
            Err(e) => {
                warn!(engine = id, error = %e, "conversion failed");
                ConversionResult::placeholder(format!("Conversion failed: {e}"))
            }
        }
    }

    /// Convert for every requested engine id. Every id gets a key; duplicate
    /// ids are converted again under the same key.
    #[instrument(skip(self, fields, ids), fields(engines = ids.len()))]
    pub fn convert_all<S: AsRef<str>>(
        &self,
        fields: &NormalizedFields,
        ids: &[S],
    ) -> BTreeMap<String, ConversionResult> {
        let mut results = BTreeMap::new();
        for id in ids {
            let id = id.as_ref();
            debug!(engine = id, "converting");
            results.insert(id.to_string(), self.convert(fields, id));
        }
        results
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("engines", &self.ids()).finish()
    }
}

/// Descriptors of the built-in engines: Shodan, Censys, FOFA.
#[must_use]
pub fn supported_engines() -> Vec<EngineDescriptor> {
    vec![
        crate::shodan::DESCRIPTOR,
        crate::censys::DESCRIPTOR,
        crate::fofa::DESCRIPTOR,
    ]
}

/// Convert with the built-in engines.
pub fn convert_all<S: AsRef<str>>(
    fields: &NormalizedFields,
    ids: &[S],
) -> BTreeMap<String, ConversionResult> {
    Registry::new().convert_all(fields, ids)
}
