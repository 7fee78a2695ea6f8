//! # Engine Error Types Module
//!
//! This module defines the error type surfaced by the recipe matching engine.
//! The scoring and parsing components themselves never fail; only the
//! collaborators around them (catalog reads, synonym table loading,
//! configuration) produce errors.

/// Custom error types for engine operations
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Catalog read collaborator failures (storage unavailable, unreadable file)
    Catalog(String),
    /// Synonym table loading or validation errors
    TableLoad(String),
    /// Configuration errors
    Config(String),
    /// Caller supplied arguments outside the accepted domain
    InvalidInput(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Catalog(msg) => write!(f, "Catalog error: {msg}"),
            EngineError::TableLoad(msg) => write!(f, "Synonym table error: {msg}"),
            EngineError::Config(msg) => write!(f, "Configuration error: {msg}"),
            EngineError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<anyhow::Error> for EngineError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain on one line
        EngineError::Catalog(format!("{err:#}"))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
