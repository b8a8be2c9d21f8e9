//! Common error types for the tribunal core

use thiserror::Error;

/// Common result type for tribunal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the dispute arbitration core
///
/// Every public operation either takes full effect or returns one of these
/// with no state change. Fetch failures are the one exception: they are
/// recovered locally inside evidence aggregation and never escape it.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input (bounds, counts, identity checks)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation attempted against a dispute in the wrong status
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Requested dispute or evidence record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Web content fetch failure (recovered inside evidence aggregation)
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// No quorum-accepted verdict; the resolve operation fails entirely
    #[error("Consensus failure: {0}")]
    ConsensusFailure(String),

    /// Defensive arithmetic guard tripped before a transfer was issued.
    /// Indicates a validation-rule gap; should be unreachable.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// Reasoning oracle call failure
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Ledger transfer failure
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Store operation error (wraps sqlx::Error)
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
