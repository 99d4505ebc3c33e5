//! Error types for the market assistant.

use thiserror::Error;

/// Top-level assistant error.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Decision error: {0}")]
    Decision(#[from] DecisionError),

    #[error("News error: {0}")]
    News(#[from] NewsError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Market data errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for {0}")]
    NoDataAvailable(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Symbol universe unavailable: {0}")]
    UniverseUnavailable(String),
}

/// Decision engine configuration errors.
#[derive(Error, Debug)]
pub enum DecisionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// News retrieval errors.
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Notification delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notifier credentials are not configured")]
    MissingCredentials,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for assistant operations.
pub type AssistantResult<T> = Result<T, AssistantError>;
