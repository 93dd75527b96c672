use chrono::{DateTime, Utc};

use crate::model::{HealthBand, SessionRowId, SessionToken};

/// Local record of one quick-check session.
///
/// Created when the user starts the quiz and written once when results are
/// first computed. `mark_finalized` is the idempotence guard the flow
/// relies on: the remote finalize call happens at most once per session
/// lifetime, even when the results page renders repeatedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSession {
    token: SessionToken,
    created_at: DateTime<Utc>,
    remote_id: Option<SessionRowId>,
    finalized: bool,
    final_score: Option<u8>,
    band: Option<HealthBand>,
    completed_at: Option<DateTime<Utc>>,
}

impl AssessmentSession {
    #[must_use]
    pub fn new(token: SessionToken, created_at: DateTime<Utc>) -> Self {
        Self {
            token,
            created_at,
            remote_id: None,
            finalized: false,
            final_score: None,
            band: None,
            completed_at: None,
        }
    }

    pub fn set_remote_id(&mut self, id: SessionRowId) {
        self.remote_id = Some(id);
    }

    #[must_use]
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Remote row id, absent when session creation failed upstream.
    #[must_use]
    pub fn remote_id(&self) -> Option<SessionRowId> {
        self.remote_id
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[must_use]
    pub fn final_score(&self) -> Option<u8> {
        self.final_score
    }

    #[must_use]
    pub fn band(&self) -> Option<HealthBand> {
        self.band
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Record the final outcome. Returns `false` (and changes nothing) if
    /// the session was already finalized.
    pub fn mark_finalized(
        &mut self,
        score: u8,
        band: HealthBand,
        completed_at: DateTime<Utc>,
    ) -> bool {
        if self.finalized {
            return false;
        }
        self.finalized = true;
        self.final_score = Some(score);
        self.band = Some(band);
        self.completed_at = Some(completed_at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn finalize_is_idempotent() {
        let mut session = AssessmentSession::new(SessionToken::mint(), fixed_now());
        assert!(!session.is_finalized());

        assert!(session.mark_finalized(63, HealthBand::AtRisk, fixed_now()));
        assert!(session.is_finalized());
        assert_eq!(session.final_score(), Some(63));

        // A second finalize must not overwrite the first outcome.
        assert!(!session.mark_finalized(100, HealthBand::Healthy, fixed_now()));
        assert_eq!(session.final_score(), Some(63));
        assert_eq!(session.band(), Some(HealthBand::AtRisk));
    }

    #[test]
    fn fresh_session_has_no_remote_id() {
        let session = AssessmentSession::new(SessionToken::mint(), fixed_now());
        assert_eq!(session.remote_id(), None);
        assert_eq!(session.completed_at(), None);
    }
}
