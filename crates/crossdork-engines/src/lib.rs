//! Query converters for Shodan, Censys and FOFA.
//!
//! Each engine turns the same [`NormalizedFields`] into its own grammar. The
//! [`Registry`] lists the engines and dispatches to them, keeping one
//! engine's failure away from the others.
//!
//! ```rust
//! use crossdork_core::{Field, NormalizedFields};
//! use crossdork_engines::Registry;
//!
//! let fields = NormalizedFields::new()
//!     .with(Field::Port, vec![80, 443])
//!     .with(Field::Asn, "AS13335");
//!
//! let results = Registry::new().convert_all(&fields, &["shodan", "fofa"]);
//! assert_eq!(results["shodan"].query, "port:80,443 asn:13335");
//! assert_eq!(results["fofa"].query, "(port=80 || port=443) && asn=13335");
//! ```

#![doc(html_root_url = "https://docs.rs/crossdork-engines/0.3.0")]

pub mod api;
pub mod censys;
pub mod clause;
pub mod fofa;
mod links;
mod registry;
pub mod shodan;

use crossdork_core::{ConversionResult, EngineDescriptor, NormalizedFields, Result};

pub use censys::CensysConverter;
pub use fofa::FofaConverter;
pub use links::search_url;
pub use registry::{convert_all, supported_engines, Registry};
pub use shodan::ShodanConverter;

/// Turns a field mapping into one engine's query.
///
/// Implementations are pure: same input, same output, no I/O. Unusable
/// field values are skipped rather than reported; `Err` is reserved for
/// broken converter state and is caught by the [`Registry`].
pub trait Converter: Send + Sync {
    /// Static metadata for this engine
    fn descriptor(&self) -> EngineDescriptor;

    /// Build the query, notes and fallback for `fields`
    fn convert(&self, fields: &NormalizedFields) -> Result<ConversionResult>;
}
