//! Translate one set of search fields into Shodan, Censys and FOFA queries.
//!
//! # Quick Start
//!
//! ```rust
//! use crossdork::{search_url, Field, NormalizedFields, Registry};
//!
//! let fields = NormalizedFields::new()
//!     .with(Field::Port, vec![80, 443])
//!     .with(Field::Country, "CN");
//!
//! let registry = Registry::new();
//! for (engine, result) in registry.convert_all(&fields, &registry.ids()) {
//!     println!("{engine}: {}", result.query);
//!     if let Some(url) = search_url(&engine, &result.query) {
//!         println!("  {url}");
//!     }
//! }
//! ```
//!
//! Field mappings can be shared as compact codes:
//!
//! ```rust
//! use crossdork::codec::{decode_fields, encode_fields};
//! use crossdork::{Field, NormalizedFields};
//!
//! let fields = NormalizedFields::new().with(Field::Domain, "example.com");
//! let code = encode_fields(&fields)?;
//! assert_eq!(decode_fields(&code)?, fields);
//! # Ok::<(), crossdork::QueryError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/crossdork/0.3.0")]

// Re-export core types
pub use crossdork_core::*;

// Re-export engines
pub use crossdork_engines::{
    api, censys, clause, convert_all, fofa, search_url, shodan, supported_engines,
    CensysConverter, Converter, FofaConverter, Registry, ShodanConverter,
};

// Re-export serialization crates for callers building requests by hand
pub use serde;
pub use serde_json;
