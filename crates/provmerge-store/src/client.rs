//! The contract a graph store backend fulfils.
//!
//! Backends report failures as [`ClientError`]; the session and importer
//! attach the context that turns them into a [`crate::StoreError`].

use crate::config::ConnectionParams;
use crate::error::ClientError;
use crate::scheme::Scheme;
use async_trait::async_trait;
use provmerge_graph::{Edge, Node};

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// A uniqueness constraint as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniquenessConstraint {
    pub label: String,
    pub property: String,
}

impl UniquenessConstraint {
    pub fn new(label: impl Into<String>, property: impl Into<String>) -> Self {
        Self { label: label.into(), property: property.into() }
    }
}

/// Opens connections to one kind of store.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    type Client: StoreClient;

    /// Connect and authenticate. `scheme` is already validated.
    async fn open(&self, params: &ConnectionParams, scheme: Scheme) -> ClientResult<Self::Client>;
}

/// An open connection.
#[async_trait]
pub trait StoreClient: Send + Sync {
    async fn list_databases(&self) -> ClientResult<Vec<String>>;

    async fn create_database(&self, name: &str) -> ClientResult<()>;

    /// Direct subsequent constraint calls and transactions at `name`.
    async fn use_database(&mut self, name: &str) -> ClientResult<()>;

    async fn uniqueness_constraints(&self) -> ClientResult<Vec<UniquenessConstraint>>;

    async fn create_uniqueness_constraint(&self, label: &str, property: &str) -> ClientResult<()>;

    async fn begin(&self) -> ClientResult<Box<dyn StoreTransaction>>;
}

/// One atomic unit of upserts.
///
/// Nothing is visible in the store until [`StoreTransaction::commit`] succeeds.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Match on `primary_label` and `primary_key = node.identity`, create if
    /// absent, then add the node's labels and set its properties.
    async fn merge_node(&mut self, primary_label: &str, primary_key: &str, node: &Node) -> ClientResult<()>;

    /// Merge both endpoints by identity, then the relationship between them.
    async fn merge_edge(&mut self, primary_label: &str, primary_key: &str, edge: &Edge) -> ClientResult<()>;

    async fn commit(self: Box<Self>) -> ClientResult<()>;

    async fn rollback(self: Box<Self>) -> ClientResult<()>;
}
