use thiserror::Error;

use crate::model::{EmailError, QuestionBankError, ThresholdError};
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Bank(#[from] QuestionBankError),
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Threshold(#[from] ThresholdError),
}
