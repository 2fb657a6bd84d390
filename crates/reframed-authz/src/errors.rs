use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("token payload is not base64url: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("token carries no role claim")]
    MissingRole,
}

pub type AuthzResult<T> = Result<T, AuthzError>;
