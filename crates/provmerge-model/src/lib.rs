//! In-memory W3C PROV document model.
//!
//! This crate holds the parsed form of a provenance document: qualified
//! names, typed attribute values, elements, relations and arbitrarily nested
//! bundles. Documents are built either with the fluent builders or read from
//! PROV-JSON.

pub mod builders;
pub mod document;
pub mod error;
pub mod prov_json;
pub mod qualified_name;
pub mod value;
pub mod vocabulary;

pub use builders::{BundleBuilder, ElementBuilder, ProvDocumentBuilder, RelationBuilder};
pub use document::{Attribute, Bundle, Element, ElementKind, ProvDocument, Relation, RelationKind};
pub use error::{ModelError, Result};
pub use qualified_name::QualifiedName;
pub use value::{AttributeValue, Literal};
