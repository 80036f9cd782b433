// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors raised while fetching listings from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read listings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed listings payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("listings request failed: {0}")]
    Http(String),

    #[error("listings database error: {0}")]
    Db(String),
}

/// Errors raised while delivering a payload to the host client.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("host bridge request failed: {0}")]
    Request(String),

    #[error("host bridge rejected payload: {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("failed to encode host payload: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("invalid configuration for {key}: {message}")]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Source(_) | ServerError::Bridge(_) => 502,
            ServerError::DbError(_) | ServerError::Config(_) | ServerError::InternalError => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
