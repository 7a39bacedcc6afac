//! In-process store with the same upsert semantics as the graph database.
//!
//! Used for dry runs and tests. It can imitate a single-database edition,
//! reject credentials, fail a chosen commit or fail upserts of one identity.

use crate::client::{ClientResult, StoreClient, StoreConnector, StoreTransaction, UniquenessConstraint};
use crate::config::{ConnectionParams, DEFAULT_DATABASE};
use crate::scheme::Scheme;
use async_trait::async_trait;
use provmerge_graph::{Edge, Node, PropertyValue};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::Mutex;

const SYSTEM_DATABASE: &str = "system";

/// A node as stored: labels including the primary label, and properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredNode {
    pub labels: BTreeSet<String>,
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Relationships are unique per source, type and target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub source: String,
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGraph {
    pub nodes: BTreeMap<String, StoredNode>,
    pub edges: BTreeMap<EdgeKey, BTreeMap<String, PropertyValue>>,
}

impl MemoryGraph {
    pub fn node(&self, identity: &str) -> Option<&StoredNode> {
        self.nodes.get(identity)
    }

    pub fn has_edge(&self, source: &str, label: &str, target: &str) -> bool {
        self.edges.contains_key(&EdgeKey {
            source: source.to_string(),
            label: label.to_string(),
            target: target.to_string(),
        })
    }

    fn ensure_node(&mut self, primary_label: &str, primary_key: &str, identity: &str) -> &mut StoredNode {
        self.nodes.entry(identity.to_string()).or_insert_with(|| {
            let mut node = StoredNode::default();
            node.labels.insert(primary_label.to_string());
            node.properties.insert(primary_key.to_string(), PropertyValue::from(identity));
            node
        })
    }

    fn apply(&mut self, operation: Operation) {
        match operation {
            Operation::Node { primary_label, primary_key, node } => {
                let stored = self.ensure_node(&primary_label, &primary_key, &node.identity);
                stored.labels.extend(node.labels);
                stored.properties.extend(node.properties);
            }
            Operation::Edge { primary_label, primary_key, edge } => {
                self.ensure_node(&primary_label, &primary_key, &edge.source);
                self.ensure_node(&primary_label, &primary_key, &edge.target);
                let key = EdgeKey { source: edge.source, label: edge.label, target: edge.target };
                self.edges.entry(key).or_default().extend(edge.properties);
            }
        }
    }
}

/// One committed transaction, as recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedTransaction {
    pub database: String,
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeKey>,
}

impl CommittedTransaction {
    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct Database {
    graph: MemoryGraph,
    constraints: BTreeSet<UniquenessConstraint>,
}

#[derive(Debug)]
struct MemoryState {
    databases: BTreeMap<String, Database>,
    commit_attempts: usize,
    rollbacks: usize,
    log: Vec<CommittedTransaction>,
}

impl Default for MemoryState {
    fn default() -> Self {
        let mut databases = BTreeMap::new();
        databases.insert(SYSTEM_DATABASE.to_string(), Database::default());
        databases.insert(DEFAULT_DATABASE.to_string(), Database::default());
        Self { databases, commit_attempts: 0, rollbacks: 0, log: Vec::new() }
    }
}

#[derive(Debug, Clone, Default)]
struct Behaviour {
    single_database: bool,
    password: Option<String>,
    fail_commit: Option<usize>,
    fail_identity: Option<String>,
}

/// Shared handle to an in-memory store. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    behaviour: Behaviour,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to create databases, like a community edition.
    pub fn single_database(mut self) -> Self {
        self.behaviour.single_database = true;
        self
    }

    /// Only accept connections presenting this password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.behaviour.password = Some(password.into());
        self
    }

    /// Fail the `attempt`-th commit (counting from 1) across all clients.
    pub fn fail_commit(mut self, attempt: usize) -> Self {
        self.behaviour.fail_commit = Some(attempt);
        self
    }

    /// Fail any upsert that touches `identity`.
    pub fn fail_on_identity(mut self, identity: impl Into<String>) -> Self {
        self.behaviour.fail_identity = Some(identity.into());
        self
    }

    pub async fn databases(&self) -> Vec<String> {
        self.state.lock().await.databases.keys().cloned().collect()
    }

    pub async fn graph(&self, database: &str) -> Option<MemoryGraph> {
        self.state.lock().await.databases.get(database).map(|db| db.graph.clone())
    }

    pub async fn constraints(&self, database: &str) -> Vec<UniquenessConstraint> {
        self.state
            .lock()
            .await
            .databases
            .get(database)
            .map(|db| db.constraints.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn transactions(&self) -> Vec<CommittedTransaction> {
        self.state.lock().await.log.clone()
    }

    pub async fn rollbacks(&self) -> usize {
        self.state.lock().await.rollbacks
    }
}

#[async_trait]
impl StoreConnector for MemoryStore {
    type Client = MemoryClient;

    async fn open(&self, params: &ConnectionParams, _scheme: Scheme) -> ClientResult<MemoryClient> {
        if let Some(expected) = &self.behaviour.password {
            if *expected != params.password {
                return Err("authentication failure".into());
            }
        }
        Ok(MemoryClient { store: self.clone(), database: SYSTEM_DATABASE.to_string() })
    }
}

pub struct MemoryClient {
    store: MemoryStore,
    database: String,
}

impl MemoryClient {
    pub fn database(&self) -> &str {
        &self.database
    }
}

#[async_trait]
impl StoreClient for MemoryClient {
    async fn list_databases(&self) -> ClientResult<Vec<String>> {
        Ok(self.store.databases().await)
    }

    async fn create_database(&self, name: &str) -> ClientResult<()> {
        if self.store.behaviour.single_database {
            return Err(format!("unsupported administration command: CREATE DATABASE {}", name).into());
        }
        let mut state = self.store.state.lock().await;
        state.databases.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn use_database(&mut self, name: &str) -> ClientResult<()> {
        if !self.store.state.lock().await.databases.contains_key(name) {
            return Err(format!("database {} does not exist", name).into());
        }
        self.database = name.to_string();
        Ok(())
    }

    async fn uniqueness_constraints(&self) -> ClientResult<Vec<UniquenessConstraint>> {
        Ok(self.store.constraints(&self.database).await)
    }

    async fn create_uniqueness_constraint(&self, label: &str, property: &str) -> ClientResult<()> {
        let mut state = self.store.state.lock().await;
        let database = state
            .databases
            .get_mut(&self.database)
            .ok_or_else(|| format!("database {} does not exist", self.database))?;
        database.constraints.insert(UniquenessConstraint::new(label, property));
        Ok(())
    }

    async fn begin(&self) -> ClientResult<Box<dyn StoreTransaction>> {
        Ok(Box::new(MemoryTransaction {
            store: self.store.clone(),
            database: self.database.clone(),
            operations: Vec::new(),
        }))
    }
}

enum Operation {
    Node { primary_label: String, primary_key: String, node: Node },
    Edge { primary_label: String, primary_key: String, edge: Edge },
}

struct MemoryTransaction {
    store: MemoryStore,
    database: String,
    operations: Vec<Operation>,
}

impl MemoryTransaction {
    fn check_identity(&self, identities: &[&str]) -> ClientResult<()> {
        match &self.store.behaviour.fail_identity {
            Some(failing) if identities.contains(&failing.as_str()) => {
                Err(format!("upsert of {} rejected", failing).into())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn merge_node(&mut self, primary_label: &str, primary_key: &str, node: &Node) -> ClientResult<()> {
        self.check_identity(&[node.identity.as_str()])?;
        self.operations.push(Operation::Node {
            primary_label: primary_label.to_string(),
            primary_key: primary_key.to_string(),
            node: node.clone(),
        });
        Ok(())
    }

    async fn merge_edge(&mut self, primary_label: &str, primary_key: &str, edge: &Edge) -> ClientResult<()> {
        self.check_identity(&[edge.source.as_str(), edge.target.as_str()])?;
        self.operations.push(Operation::Edge {
            primary_label: primary_label.to_string(),
            primary_key: primary_key.to_string(),
            edge: edge.clone(),
        });
        Ok(())
    }

    async fn commit(self: Box<Self>) -> ClientResult<()> {
        let MemoryTransaction { store, database, operations } = *self;
        let mut state = store.state.lock().await;
        state.commit_attempts += 1;
        if store.behaviour.fail_commit == Some(state.commit_attempts) {
            return Err(format!("commit {} rejected", state.commit_attempts).into());
        }

        let mut record = CommittedTransaction { database: database.clone(), nodes: Vec::new(), edges: Vec::new() };
        let target = state
            .databases
            .get_mut(&database)
            .ok_or_else(|| format!("database {} does not exist", database))?;
        for operation in operations {
            match &operation {
                Operation::Node { node, .. } => record.nodes.push(node.identity.clone()),
                Operation::Edge { edge, .. } => record.edges.push(EdgeKey {
                    source: edge.source.clone(),
                    label: edge.label.clone(),
                    target: edge.target.clone(),
                }),
            }
            target.graph.apply(operation);
        }
        state.log.push(record);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> ClientResult<()> {
        self.store.state.lock().await.rollbacks += 1;
        Ok(())
    }
}
