//! Importing materialized PROV graphs into a graph store.
//!
//! [`StoreSession`] owns the connection lifecycle and hands the node and
//! edge collections to [`BatchImporter`]. Backends implement the traits in
//! [`client`]: [`MemoryStore`] always, [`Neo4jConnector`] with the `neo4j`
//! feature.

pub mod client;
pub mod config;
pub mod cypher;
pub mod error;
pub mod importer;
pub mod memory;
#[cfg(feature = "neo4j")]
pub mod neo4j;
pub mod scheme;
pub mod session;

pub use client::{ClientResult, StoreClient, StoreConnector, StoreTransaction, UniquenessConstraint};
pub use config::{ConnectionParams, DEFAULT_BATCH_SIZE, ImportConfig};
pub use error::{BatchKind, ClientError, Result, StoreError};
pub use importer::{BatchImporter, ImportSummary};
pub use memory::{CommittedTransaction, EdgeKey, MemoryGraph, MemoryStore, StoredNode};
#[cfg(feature = "neo4j")]
pub use neo4j::{Neo4jClient, Neo4jConnector};
pub use scheme::Scheme;
pub use session::{SessionState, StoreSession};
