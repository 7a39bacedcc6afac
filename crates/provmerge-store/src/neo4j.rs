//! Neo4j backend over the Bolt protocol (`neo4rs`).
//!
//! Administration statements run against the `system` database; once the
//! target database is selected the client reconnects bound to it.

use crate::client::{ClientResult, StoreClient, StoreConnector, StoreTransaction, UniquenessConstraint};
use crate::config::ConnectionParams;
use crate::cypher;
use crate::scheme::Scheme;
use async_trait::async_trait;
use neo4rs::{BoltType, ConfigBuilder, Graph, Txn, query};
use provmerge_graph::{Edge, Node, PropertyValue};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const SYSTEM_DATABASE: &str = "system";

#[derive(Debug, Clone, Default)]
pub struct Neo4jConnector {
    max_connections: Option<usize>,
}

impl Neo4jConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    async fn connect(&self, params: &ConnectionParams, scheme: Scheme, database: &str) -> ClientResult<Graph> {
        let mut builder = ConfigBuilder::default()
            .uri(scheme.uri(&params.address))
            .user(params.user.as_str())
            .password(params.password.as_str())
            .db(database);
        if let Some(max_connections) = self.max_connections {
            builder = builder.max_connections(max_connections);
        }
        let graph = Graph::connect(builder.build()?).await?;
        graph.run(query("RETURN 1")).await?;
        debug!(database, "Bolt connection verified");
        Ok(graph)
    }
}

#[async_trait]
impl StoreConnector for Neo4jConnector {
    type Client = Neo4jClient;

    async fn open(&self, params: &ConnectionParams, scheme: Scheme) -> ClientResult<Neo4jClient> {
        let graph = self.connect(params, scheme, SYSTEM_DATABASE).await?;
        Ok(Neo4jClient {
            connector: self.clone(),
            params: params.clone(),
            scheme,
            graph,
        })
    }
}

pub struct Neo4jClient {
    connector: Neo4jConnector,
    params: ConnectionParams,
    scheme: Scheme,
    graph: Graph,
}

#[async_trait]
impl StoreClient for Neo4jClient {
    async fn list_databases(&self) -> ClientResult<Vec<String>> {
        let mut rows = self.graph.execute(query(cypher::LIST_DATABASES)).await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>("name")?);
        }
        Ok(names)
    }

    async fn create_database(&self, name: &str) -> ClientResult<()> {
        self.graph
            .run(query(cypher::CREATE_DATABASE).param(cypher::NAME_PARAM, name))
            .await?;
        Ok(())
    }

    async fn use_database(&mut self, name: &str) -> ClientResult<()> {
        self.graph = self.connector.connect(&self.params, self.scheme, name).await?;
        Ok(())
    }

    async fn uniqueness_constraints(&self) -> ClientResult<Vec<UniquenessConstraint>> {
        let mut rows = self.graph.execute(query(cypher::LIST_CONSTRAINTS)).await?;
        let mut constraints = Vec::new();
        while let Some(row) = rows.next().await? {
            let kind: String = row.get("type")?;
            if !kind.contains("UNIQUENESS") {
                continue;
            }
            let labels: Vec<String> = row.get("labelsOrTypes")?;
            let properties: Vec<String> = row.get("properties")?;
            // Composite constraints do not make a single property unique.
            if let ([label], [property]) = (labels.as_slice(), properties.as_slice()) {
                constraints.push(UniquenessConstraint::new(label.as_str(), property.as_str()));
            }
        }
        Ok(constraints)
    }

    async fn create_uniqueness_constraint(&self, label: &str, property: &str) -> ClientResult<()> {
        let statement = cypher::create_uniqueness_constraint(label, property);
        self.graph.run(query(&statement)).await?;
        Ok(())
    }

    async fn begin(&self) -> ClientResult<Box<dyn StoreTransaction>> {
        let txn = self.graph.start_txn().await?;
        Ok(Box::new(Neo4jTransaction { txn }))
    }
}

struct Neo4jTransaction {
    txn: Txn,
}

#[async_trait]
impl StoreTransaction for Neo4jTransaction {
    async fn merge_node(&mut self, primary_label: &str, primary_key: &str, node: &Node) -> ClientResult<()> {
        let statement = cypher::merge_node(primary_label, primary_key, &node.labels);
        let merge = query(&statement)
            .param(cypher::IDENTITY_PARAM, node.identity.as_str())
            .param(cypher::PROPS_PARAM, bolt_map(&node.properties));
        self.txn.run(merge).await?;
        Ok(())
    }

    async fn merge_edge(&mut self, primary_label: &str, primary_key: &str, edge: &Edge) -> ClientResult<()> {
        let statement = cypher::merge_edge(primary_label, primary_key, &edge.label);
        let merge = query(&statement)
            .param(cypher::SOURCE_PARAM, edge.source.as_str())
            .param(cypher::TARGET_PARAM, edge.target.as_str())
            .param(cypher::PROPS_PARAM, bolt_map(&edge.properties));
        self.txn.run(merge).await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> ClientResult<()> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> ClientResult<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}

fn bolt_map(properties: &BTreeMap<String, PropertyValue>) -> HashMap<String, BoltType> {
    properties
        .iter()
        .map(|(key, value)| (key.clone(), bolt_value(value)))
        .collect()
}

fn bolt_value(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::String(value) => value.clone().into(),
        PropertyValue::Integer(value) => (*value).into(),
        PropertyValue::Float(value) => (*value).into(),
        PropertyValue::Boolean(value) => (*value).into(),
        PropertyValue::DateTime(value) => (*value).into(),
        PropertyValue::Time(value) => (*value).into(),
        // Bolt durations cannot be negative; those fall back to seconds.
        PropertyValue::Duration(value) => match value.to_std() {
            Ok(duration) => duration.into(),
            Err(_) => (value.num_milliseconds() as f64 / 1000.0).into(),
        },
        PropertyValue::List(values) => values.iter().map(bolt_value).collect::<Vec<BoltType>>().into(),
    }
}
