//! # pack-uri
//!
//! A pure Rust implementation of the addressing scheme used by OPC
//! (Open Packaging Conventions) containers: composite `pack://` locators
//! and the part names they embed.
//!
//! A package is a container holding named parts. Each part is addressed by
//! a validated part name (an absolute-rooted path such as
//! `/word/document.xml`), and a package+part pair folds into a single
//! absolute `pack://` URI whose authority component carries the package
//! locator with `/` mapped to `,`.
//!
//! This crate covers parsing, grammar validation, escaping, normalization,
//! and comparison for both forms. It does not read or write container
//! bytes, interpret relationship content, or resolve relative references.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Full part-name grammar validation with distinct, enumerable failures
//! - Canonical-escaping round-trip check that rejects ambiguous encodings
//! - Case-insensitive, byte-faithful comparison and ordering
//! - Relationship-part classification, including rejection of nested
//!   relationship parts
//! - Composite `pack://` locator decomposition and composition
//!
//! ## Example
//!
//! ```
//! use pack_uri::{PackUri, PartName};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let locator = PackUri::parse("pack://https:,,example.com,box/doc.xml")?;
//! assert_eq!(locator.package_locator().as_str(), "https://example.com/box");
//! assert_eq!(locator.part_name().unwrap().as_str(), "/doc.xml");
//!
//! let part = PartName::parse("/word/document.xml")?;
//! assert_eq!(part.extension(), "xml");
//! assert!(!part.is_relationship_part());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod encoding;
pub mod error;
pub mod pack_uri;
pub mod part_name;

pub use error::{Error, Result};
pub use pack_uri::{PACK_SCHEME, PackUri, is_pack_uri};
pub use part_name::{
    PartName, RELATIONSHIP_EXTENSION, RELATIONSHIP_SEGMENT, ROOT_RELATIONSHIP_PART,
    RelationshipSource,
};
