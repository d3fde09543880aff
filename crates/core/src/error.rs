use thiserror::Error;

/// Error kinds the screening core can produce. `InvalidQuery`,
/// `InvalidConfiguration`, and `BatchLimitExceeded` are always surfaced to
/// the caller; `CorpusError` downgrades to a per-entry skip recorded on
/// `ScreeningResponse::warnings` and never reaches this type once a
/// `CorpusView` has been built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScreeningError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("corpus error: {0}")]
    CorpusError(String),

    #[error("batch of {actual} queries exceeds the configured limit of {limit}")]
    BatchLimitExceeded { actual: usize, limit: usize },

    #[error("cancelled after {completed} of {total} queries")]
    Cancelled { completed: usize, total: usize },
}
