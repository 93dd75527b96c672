mod answers;
mod band;
mod contact;
mod ids;
mod question;
mod result;
mod session;

pub use answers::AnswerSet;
pub use band::{BandThresholds, HealthBand, ThresholdError};
pub use contact::{EmailAddress, EmailError, NewContact};
pub use ids::{ContactId, ResultRowId, SessionRowId, SessionToken};
pub use question::{AnswerOption, Question, QuestionBank, QuestionBankError};
pub use result::{NewResult, ReportStatus, ASSESSMENT_VERSION};
pub use session::AssessmentSession;
