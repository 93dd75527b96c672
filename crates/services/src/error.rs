//! Shared error types for the services crate.

use thiserror::Error;

use quickcheck_core::model::EmailError;
use quickcheck_core::scoring::ScoringError;
use storage::repository::StorageError;

/// Errors emitted by the check flow services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlowError {
    #[error("the quiz is not on the results page")]
    NotAtResults,
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while constructing booking links.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BookingError {
    #[error("invalid booking base url: {0}")]
    InvalidBase(#[from] url::ParseError),
}
