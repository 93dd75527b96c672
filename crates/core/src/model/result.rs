use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ContactId, HealthBand, SessionRowId, SessionToken};

/// Version tag stamped on every persisted result row.
pub const ASSESSMENT_VERSION: &str = "v1";

/// Delivery state of the requested report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Requested,
}

impl ReportStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Requested => "requested",
        }
    }
}

/// A result row as it is written to the remote store, exactly once per
/// email submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResult {
    pub contact: ContactId,
    pub session: Option<SessionRowId>,
    pub session_token: SessionToken,
    pub overall_score: u8,
    pub max_score: u32,
    pub band: HealthBand,
    /// Awarded points per question ordinal, 0 for unanswered.
    pub breakdown: Vec<u32>,
    pub report_status: ReportStatus,
    pub created_at: DateTime<Utc>,
}
