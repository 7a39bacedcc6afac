//! Conversion of PROV documents into a merged property graph.
//!
//! The pipeline is: walk the document breadth-first through its bundles,
//! accumulate every declaration into a [`PropertySet`] keyed by its encoded
//! identity, then resolve relations into edges (or node properties when the
//! target is a literal) and add bundle containment edges.

pub mod error;
pub mod identifier;
pub mod materializer;
pub mod property_set;
pub mod value;
pub mod vocabulary;
pub mod walker;

pub use error::{GraphError, Result};
pub use identifier::encode_identifier;
pub use materializer::{Edge, IdentityMap, MaterializedGraph, Node, materialize, materialize_with};
pub use property_set::PropertySet;
pub use value::{PropertyValue, encode_value};
pub use walker::{BundleWalker, Record, WalkItem, walk};
