use thiserror::Error;

#[derive(Error, Debug)]
pub enum OddsError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("game record {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OddsError>;
