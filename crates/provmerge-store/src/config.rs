use crate::error::{Result, StoreError};
use std::fmt;

pub const DEFAULT_ADDRESS: &str = "localhost:7687";
pub const DEFAULT_USER: &str = "neo4j";
pub const DEFAULT_DATABASE: &str = "neo4j";
pub const DEFAULT_SCHEME: &str = "bolt";
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Where and how to connect. The scheme is validated when connecting.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub address: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub scheme: String,
}

impl ConnectionParams {
    pub fn new(address: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            user: user.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("address", &self.address)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("scheme", &self.scheme)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    batch_size: usize,
}

impl ImportConfig {
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(StoreError::InvalidBatchSize);
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_password() {
        let params = ConnectionParams::new("db:7687", "neo4j", "s3cret");
        let rendered = format!("{:?}", params);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("db:7687"));
    }

    #[test]
    fn defaults_point_at_a_local_server() {
        let params = ConnectionParams::default();
        assert_eq!(params.address, "localhost:7687");
        assert_eq!(params.scheme, "bolt");
        assert_eq!(params.database, "neo4j");
        assert_eq!(ImportConfig::default().batch_size(), 200);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(matches!(ImportConfig::new(0), Err(StoreError::InvalidBatchSize)));
        assert_eq!(ImportConfig::new(3).map(|config| config.batch_size()).ok(), Some(3));
    }
}
