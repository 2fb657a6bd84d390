use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("action must be a json object, got {0}")]
    NotAnObject(&'static str),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
