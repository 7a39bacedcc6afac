use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read PROV document")]
    Io(#[from] std::io::Error),
    #[error("malformed PROV-JSON")]
    Json(#[from] serde_json::Error),
    #[error("invalid PROV-JSON document at {path}: {reason}")]
    InvalidDocument { path: String, reason: String },
    #[error("unknown relation section '{0}'")]
    UnknownRelation(String),
    #[error("relation {relation} at {path} is missing formal attribute {attribute}")]
    MissingFormal { relation: String, path: String, attribute: String },
    #[error("invalid {datatype} value '{value}'")]
    InvalidValue { datatype: String, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
