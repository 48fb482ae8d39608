//! # xsd2proto
//!
//! Convert XML Schema (XSD) documents into proto3 Protocol Buffer definitions.
//!
//! ## Features
//!
//! - XSD decoding of elements, complex types (sequence, choice, attributes)
//!   and simple types (restriction, union, list)
//! - Recursive `import`/`include` resolution
//! - Enums from enumerated simple types, with `_UNSPECIFIED` zero values
//! - Unique message and enum names across the whole file
//! - `ArrayOfX` wrapper types collapsed into `repeated` fields
//! - Nested messages and enums for inline types
//! - `.proto` text rendering and JSON dumps of the output model
//!
//! ## Example
//!
//! ```rust,ignore
//! use xsd2proto::converter::Converter;
//! use xsd2proto::proto::{render, RenderOptions};
//! use xsd2proto::xsd::SchemaResolver;
//!
//! let schema = SchemaResolver::new().resolve_file("schema.xsd")?;
//! schema.validate()?;
//!
//! let file = Converter::new().convert(&schema)?;
//! println!("{}", render(&file, &RenderOptions::new()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod names;

// Resource loading
pub mod documents;
pub mod loaders;

// Input and output models
pub mod proto;
pub mod xsd;

// Conversion
pub mod converter;

// Re-exports for convenience
pub use converter::{ConversionSummary, Converter, ConverterConfig, FieldNamingStyle};
pub use error::{ConversionError, Error, ParseError, Result};
pub use proto::{render, ProtoFile, RenderOptions};
pub use xsd::{Schema, SchemaParser, SchemaResolver};

/// Version of the xsd2proto library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
