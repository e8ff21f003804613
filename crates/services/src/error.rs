//! Shared error types for the services crate.

use thiserror::Error;

use storage::BankError;

/// Errors emitted by quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz session is no longer running")]
    DriverClosed,
    #[error(transparent)]
    Bank(#[from] BankError),
}
