//! Core types for crossdork.
//!
//! This crate provides the pieces every engine converter shares:
//!
//! - **Fields**: the normalized vocabulary ([`Field`]) and the value model
//!   ([`Scalar`], [`FieldValue`], [`NormalizedFields`])
//! - **Results**: [`ConversionResult`] and [`EngineDescriptor`]
//! - **Errors**: [`QueryError`]
//! - **Share codes**: compact URL-safe encoding of field mappings ([`codec`])
//!
//! # Example
//!
//! ```rust
//! use crossdork_core::{Field, NormalizedFields};
//!
//! let fields = NormalizedFields::new()
//!     .with(Field::Port, vec![80, 443])
//!     .with(Field::Country, "DE");
//!
//! assert_eq!(fields.values(Field::Port), vec!["80", "443"]);
//! ```

#![doc(html_root_url = "https://docs.rs/crossdork-core/0.3.0")]

pub mod codec;
mod error;
pub mod types;

pub use error::{QueryError, Result};
pub use types::*;
