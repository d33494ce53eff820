//! Error types for artifact loading and inference.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path}: {source}")]
    Load {
        path: String,
        source: Box<ModelError>,
    },

    #[error("Unexpected artifact format: expected '{expected}', found '{found}'")]
    Format { expected: String, found: String },

    #[error("Unsupported {kind} version {found} (supported: {supported})")]
    UnsupportedVersion {
        kind: String,
        found: u32,
        supported: u32,
    },

    #[error("Invalid {kind} artifact: {reason}")]
    Invalid { kind: String, reason: String },

    #[error("Invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("X has {found} features, but the classifier is expecting {expected} features as input")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("y contains previously unseen labels: [{0}]")]
    UnseenLabel(i64),

    #[error("{stage} returned no result")]
    EmptyPrediction { stage: &'static str },

    #[error("Inference error: {0}")]
    Inference(String),
}

impl ModelError {
    pub(crate) fn invalid(kind: &str, reason: impl Into<String>) -> Self {
        ModelError::Invalid {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }
}
