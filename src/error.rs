use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("data error: {0}")]
    Data(String),

    #[error("window index {index} out of bounds (dataset has {len} windows)")]
    WindowOutOfBounds { index: usize, len: usize },

    #[error("tensor error: {0}")]
    Tensor(String),

    #[error("insufficient data: need at least {needed} complete rows, have {available}")]
    InsufficientData { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
