use provmerge_graph::GraphError;
use thiserror::Error;

/// Error reported by a store backend, kept as the source of a [`StoreError`].
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unsupported connection scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("failed to connect to {scheme}://{address} as user '{user}'")]
    Connection {
        scheme: String,
        address: String,
        user: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to create database '{database}'")]
    DatabaseCreation {
        database: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to ensure uniqueness constraint on :{label}({property})")]
    Constraint {
        label: String,
        property: String,
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("{kind} batch {index} was rejected by the store")]
    BatchCommit {
        kind: BatchKind,
        index: usize,
        #[source]
        source: ClientError,
    },

    #[error("store request failed: {operation}")]
    Client {
        operation: String,
        #[source]
        source: ClientError,
    },

    #[error("session is not connected")]
    NotConnected,

    #[error("batch size must be at least 1")]
    InvalidBatchSize,
}

impl StoreError {
    /// A suggestion for the operator, when one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            StoreError::UnsupportedScheme(_) => Some(
                "Supported schemes are bolt, bolt+s, bolt+ssc, http, https, http+s and http+ssc.",
            ),
            StoreError::Connection { .. } => {
                Some("Check the address, user name and password of the graph database.")
            }
            StoreError::DatabaseCreation { .. } => Some(
                "Creating databases may require an enterprise edition; create it manually or use an existing database.",
            ),
            StoreError::Graph(_) => Some("The input document contains a malformed declaration."),
            StoreError::BatchCommit { .. } => {
                Some("Batches committed before the failure remain in the database; re-running the import is safe.")
            }
            _ => None,
        }
    }
}

/// Which collection a batch was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Nodes,
    Edges,
}

impl BatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchKind::Nodes => "node",
            BatchKind::Edges => "edge",
        }
    }
}

impl std::fmt::Display for BatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
