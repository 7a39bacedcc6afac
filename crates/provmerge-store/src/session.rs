//! Connection lifecycle: scheme check, database selection, constraints.

use crate::client::{StoreClient, StoreConnector, UniquenessConstraint};
use crate::config::{ConnectionParams, ImportConfig};
use crate::error::{Result, StoreError};
use crate::importer::{BatchImporter, ImportSummary};
use crate::scheme::Scheme;
use provmerge_graph::vocabulary::{IDENTITY_KEY, node_labels};
use provmerge_graph::{MaterializedGraph, materialize};
use provmerge_model::ProvDocument;
use provmerge_observability::spans;
use tracing::{Instrument, debug, info};

/// `Disconnected -> Connecting -> Connected | Failed`. There is no retry;
/// after a failure the caller may call [`StoreSession::connect`] again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

pub struct StoreSession<C: StoreConnector> {
    connector: C,
    state: SessionState,
    client: Option<C::Client>,
    database: Option<String>,
}

impl<C: StoreConnector> StoreSession<C> {
    pub fn new(connector: C) -> Self {
        Self { connector, state: SessionState::Disconnected, client: None, database: None }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Connect, select or create the target database and make sure every
    /// node category has a uniqueness constraint on the identity key.
    pub async fn connect(&mut self, params: &ConnectionParams) -> Result<()> {
        self.client = None;
        self.database = None;

        let scheme = match params.scheme.parse::<Scheme>() {
            Ok(scheme) => scheme,
            Err(err) => {
                self.state = SessionState::Failed;
                return Err(err);
            }
        };

        self.state = SessionState::Connecting;
        match self.establish(params, scheme).await {
            Ok(client) => {
                self.client = Some(client);
                self.database = Some(params.database.clone());
                self.state = SessionState::Connected;
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Failed;
                Err(err)
            }
        }
    }

    async fn establish(&self, params: &ConnectionParams, scheme: Scheme) -> Result<C::Client> {
        info!(
            scheme = %scheme,
            address = %params.address,
            user = %params.user,
            encrypted = scheme.requires_encryption(),
            "Connecting to graph store"
        );
        let mut client = self.connector.open(params, scheme).await.map_err(|source| {
            StoreError::Connection {
                scheme: scheme.to_string(),
                address: params.address.clone(),
                user: params.user.clone(),
                source,
            }
        })?;

        ensure_database(&mut client, &params.database).await?;
        ensure_constraints(&client).await?;
        info!(database = %params.database, "Connected to graph store");
        Ok(client)
    }

    fn connected(&self) -> Result<(&C::Client, &str)> {
        match (&self.client, &self.database) {
            (Some(client), Some(database)) if self.state == SessionState::Connected => {
                Ok((client, database.as_str()))
            }
            _ => Err(StoreError::NotConnected),
        }
    }

    /// Upsert a materialized graph in batches.
    pub async fn import(&self, graph: &MaterializedGraph, config: &ImportConfig) -> Result<ImportSummary> {
        let (client, database) = self.connected()?;
        let run_id = spans::new_run_id();
        let importer = BatchImporter::from_config(config).with_run_id(run_id);
        let span = spans::import_document(&run_id, database, graph.nodes.len(), graph.edges.len());

        async {
            let summary = importer.import(client, &graph.nodes, &graph.edges).await?;
            info!(
                nodes = summary.nodes,
                edges = summary.edges,
                transactions = summary.transactions(),
                "Import finished"
            );
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    /// Materialize `document` and import it.
    pub async fn import_document(&self, document: &ProvDocument, config: &ImportConfig) -> Result<ImportSummary> {
        self.connected()?;
        let graph = materialize(document)?;
        self.import(&graph, config).await
    }
}

async fn ensure_database<T: StoreClient>(client: &mut T, database: &str) -> Result<()> {
    let existing = client.list_databases().await.map_err(|source| StoreError::Client {
        operation: "list databases".to_string(),
        source,
    })?;
    if existing.iter().any(|name| name == database) {
        debug!(database, "Database exists");
    } else {
        client.create_database(database).await.map_err(|source| StoreError::DatabaseCreation {
            database: database.to_string(),
            source,
        })?;
        info!(database, "Created database");
    }
    client.use_database(database).await.map_err(|source| StoreError::Client {
        operation: format!("select database {}", database),
        source,
    })
}

async fn ensure_constraints<T: StoreClient>(client: &T) -> Result<()> {
    let existing = client.uniqueness_constraints().await.map_err(|source| StoreError::Client {
        operation: "list constraints".to_string(),
        source,
    })?;
    for label in node_labels::BASIC {
        let wanted = UniquenessConstraint::new(*label, IDENTITY_KEY);
        if existing.contains(&wanted) {
            continue;
        }
        client.create_uniqueness_constraint(label, IDENTITY_KEY).await.map_err(|source| {
            StoreError::Constraint { label: label.to_string(), property: IDENTITY_KEY.to_string(), source }
        })?;
        info!(label, property = IDENTITY_KEY, "Created uniqueness constraint");
    }
    Ok(())
}
