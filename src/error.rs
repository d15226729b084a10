// ============================================================
// Error Types
// ============================================================
// The detector library reports typed errors; the CLI and use
// case layers wrap them in anyhow with extra context.

use thiserror::Error;

/// Result type for detector operations.
pub type DgaResult<T> = Result<T, DgaError>;

/// Errors raised by the detector, its data pipeline and checkpoints.
#[derive(Debug, Error)]
pub enum DgaError {
    /// A model-using operation ran before `init_model` or `load_checkpoint`
    #[error("model is not initialized; call init_model or load_checkpoint first")]
    ModelNotInitialized,

    /// Training domains and labels differ in length
    #[error("got {domains} domains but {labels} labels")]
    LengthMismatch { domains: usize, labels: usize },

    /// A label falls outside the class range the model was built with
    #[error("label {label} is outside the configured class range 0..{n_classes}")]
    LabelOutOfRange { label: usize, n_classes: usize },

    /// Invalid hyperparameter or training parameter
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Recorder failure while saving or loading a checkpoint
    #[error("checkpoint error: {0}")]
    Checkpoint(String),

    /// Tensor data could not be read back to the host
    #[error("tensor error: {0}")]
    Tensor(String),

    /// Malformed line in a domain dataset
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DgaError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a parse error for a 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse { line, message: message.into() }
    }
}
