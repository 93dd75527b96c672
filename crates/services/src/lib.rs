#![forbid(unsafe_code)]

pub mod booking;
pub mod error;
pub mod flow;

pub use quickcheck_core::Clock;

pub use booking::BookingConfig;
pub use error::{BookingError, FlowError};

pub use flow::{
    CheckEvent, CheckFlowService, CheckProgress, CheckRun, CheckState, EmailCapture, Page,
    QuizView, ResultsEntry, ResultsPageView, ScoreReport,
};
