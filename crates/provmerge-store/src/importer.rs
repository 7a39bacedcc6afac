use crate::client::{ClientResult, StoreClient, StoreTransaction};
use crate::config::ImportConfig;
use crate::error::{BatchKind, Result, StoreError};
use provmerge_graph::vocabulary::{IDENTITY_KEY, PRIMARY_LABEL};
use provmerge_graph::{Edge, Node};
use provmerge_observability::spans;
use tracing::{Instrument, debug, warn};
use uuid::Uuid;

/// Counts reported by a finished import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub nodes: usize,
    pub edges: usize,
    pub node_batches: usize,
    pub edge_batches: usize,
}

impl ImportSummary {
    pub fn transactions(&self) -> usize {
        self.node_batches + self.edge_batches
    }
}

enum Batch<'a> {
    Nodes(&'a [Node]),
    Edges(&'a [Edge]),
}

impl Batch<'_> {
    fn kind(&self) -> BatchKind {
        match self {
            Batch::Nodes(_) => BatchKind::Nodes,
            Batch::Edges(_) => BatchKind::Edges,
        }
    }

    fn len(&self) -> usize {
        match self {
            Batch::Nodes(nodes) => nodes.len(),
            Batch::Edges(edges) => edges.len(),
        }
    }
}

/// Writes nodes and then edges in fixed-size transactions.
///
/// Each batch commits on its own. When batch N fails, batches before it stay
/// committed and nothing after it is attempted.
#[derive(Debug, Clone)]
pub struct BatchImporter {
    batch_size: usize,
    run_id: Uuid,
}

impl BatchImporter {
    pub fn new(batch_size: usize) -> Result<Self> {
        let config = ImportConfig::new(batch_size)?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self { batch_size: config.batch_size(), run_id: spans::new_run_id() }
    }

    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = run_id;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub async fn import<C>(&self, client: &C, nodes: &[Node], edges: &[Edge]) -> Result<ImportSummary>
    where
        C: StoreClient + ?Sized,
    {
        let mut summary = ImportSummary { nodes: nodes.len(), edges: edges.len(), ..ImportSummary::default() };

        for (index, chunk) in nodes.chunks(self.batch_size).enumerate() {
            self.apply(client, index, Batch::Nodes(chunk)).await?;
            summary.node_batches += 1;
        }
        for (index, chunk) in edges.chunks(self.batch_size).enumerate() {
            self.apply(client, index, Batch::Edges(chunk)).await?;
            summary.edge_batches += 1;
        }
        Ok(summary)
    }

    async fn apply<C>(&self, client: &C, index: usize, batch: Batch<'_>) -> Result<()>
    where
        C: StoreClient + ?Sized,
    {
        let kind = batch.kind();
        let size = batch.len();
        let failed = |source| StoreError::BatchCommit { kind, index, source };

        async {
            let mut txn = client.begin().await.map_err(failed)?;
            let written = match batch {
                Batch::Nodes(nodes) => write_nodes(txn.as_mut(), nodes).await,
                Batch::Edges(edges) => write_edges(txn.as_mut(), edges).await,
            };
            if let Err(source) = written {
                warn!(kind = %kind, index, error = %source, "Upsert failed, rolling back batch");
                if let Err(rollback) = txn.rollback().await {
                    warn!(kind = %kind, index, error = %rollback, "Rollback failed");
                }
                return Err(failed(source));
            }
            txn.commit().await.map_err(failed)?;
            debug!(kind = %kind, index, size, "Committed batch");
            Ok(())
        }
        .instrument(spans::import_batch(&self.run_id, kind.as_str(), index, size))
        .await
    }
}

async fn write_nodes(txn: &mut dyn StoreTransaction, nodes: &[Node]) -> ClientResult<()> {
    for node in nodes {
        txn.merge_node(PRIMARY_LABEL, IDENTITY_KEY, node).await?;
    }
    Ok(())
}

async fn write_edges(txn: &mut dyn StoreTransaction, edges: &[Edge]) -> ClientResult<()> {
    for edge in edges {
        txn.merge_edge(PRIMARY_LABEL, IDENTITY_KEY, edge).await?;
    }
    Ok(())
}
