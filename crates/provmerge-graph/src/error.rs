use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{kind} declaration has an empty identifier")]
    EmptyIdentifier { kind: String },
    #[error("malformed relation {relation}: {reason}")]
    MalformedRelation { relation: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
