use thiserror::Error;

use crate::domain::error::ValidationError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Durable-store errors surfaced by the persistence gateway.
///
/// These are operator problems, not caller problems: every variant is logged
/// and reported, and a mutating operation that hits one rolls its in-memory
/// effect back before returning.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to get database connection: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("item codec error: {0}")]
    Codec(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the failure is a caller-side validation rejection rather
    /// than an infrastructure fault.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
