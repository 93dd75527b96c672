mod progress;
mod state;
mod view;
mod workflow;

// Public API of the check flow subsystem.
pub use crate::error::FlowError;
pub use progress::CheckProgress;
pub use state::{CheckEvent, CheckState, Page};
pub use view::{QuizView, ResultsPageView};
pub use workflow::{CheckFlowService, CheckRun, EmailCapture, ResultsEntry, ScoreReport};
