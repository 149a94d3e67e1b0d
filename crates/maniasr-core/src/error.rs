use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Chart has no notes")]
    EmptyChart,

    #[error("Chart has too few notes to rate: {0}")]
    TooFewNotes(usize),

    #[error("Invalid key count: {0}")]
    InvalidKeyCount(usize),

    #[error("Unsupported key count: {key_count} (supported: 1..={max})")]
    UnsupportedKeyCount { key_count: usize, max: usize },

    #[error("Note column {column} out of range for {key_count} keys")]
    ColumnOutOfRange { column: usize, key_count: usize },

    #[error("Invalid rate: {0}")]
    InvalidRate(f64),

    #[error("Note time out of range after rate scaling: {0} ms")]
    TimeOutOfRange(f64),

    #[error("Non-finite value produced in {stage}")]
    NonFinite { stage: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
