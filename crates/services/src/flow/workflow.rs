use std::sync::Arc;

use quickcheck_core::model::{
    AssessmentSession, BandThresholds, ContactId, EmailAddress, HealthBand, NewContact, NewResult,
    QuestionBank, ReportStatus, SessionToken,
};
use quickcheck_core::scoring::{self, ScoreOutcome};
use quickcheck_core::Clock;
use storage::repository::{ContactStore, ResultStore, SessionStore, StorageError};

use super::state::{CheckEvent, CheckState, Page};
use crate::error::FlowError;

/// Score and band for a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub outcome: ScoreOutcome,
    pub band: HealthBand,
}

/// Outcome of entering the results page.
///
/// The report is always present; a failed remote finalize rides alongside
/// so the page can surface it without losing the score.
#[derive(Debug)]
pub struct ResultsEntry {
    pub report: ScoreReport,
    pub finalize_error: Option<StorageError>,
}

/// Outcome of the email capture sub-flow.
#[derive(Debug)]
pub enum EmailCapture {
    /// Contact resolved and result row written (or attempted; a failed
    /// write rides alongside, the submission still counts).
    Submitted {
        contact: ContactId,
        result_error: Option<StorageError>,
    },
    /// A previous submission already went through; nothing was sent.
    AlreadySubmitted,
}

/// One user's traversal of the quick check: navigation state plus the
/// session record that anchors remote writes.
#[derive(Debug, Clone)]
pub struct CheckRun {
    state: CheckState,
    session: AssessmentSession,
}

impl CheckRun {
    #[must_use]
    pub fn state(&self) -> &CheckState {
        &self.state
    }

    #[must_use]
    pub fn session(&self) -> &AssessmentSession {
        &self.session
    }
}

/// Orchestrates the quick-check flow against the record stores.
///
/// The reducer in `CheckState` owns navigation; this service owns every
/// remote side effect, one awaited call per transition at most.
#[derive(Clone)]
pub struct CheckFlowService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    thresholds: BandThresholds,
    sessions: Arc<dyn SessionStore>,
    contacts: Arc<dyn ContactStore>,
    results: Arc<dyn ResultStore>,
}

impl CheckFlowService {
    #[must_use]
    pub fn new(
        clock: Clock,
        bank: Arc<QuestionBank>,
        sessions: Arc<dyn SessionStore>,
        contacts: Arc<dyn ContactStore>,
        results: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            clock,
            bank,
            thresholds: BandThresholds::default(),
            sessions,
            contacts,
            results,
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: BandThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    #[must_use]
    pub fn thresholds(&self) -> BandThresholds {
        self.thresholds
    }

    /// Start a fresh run: mint a token, create the remote session row, and
    /// enter the quiz.
    ///
    /// A failed session create never blocks the quiz; the run simply has no
    /// remote row and later finalization degrades to a local no-op.
    pub async fn start(&self) -> CheckRun {
        let token = SessionToken::mint();
        let now = self.clock.now();
        let mut session = AssessmentSession::new(token, now);

        match self
            .sessions
            .create_session(session.token(), session.created_at())
            .await
        {
            Ok(row_id) => session.set_remote_id(row_id),
            Err(error) => {
                tracing::warn!(%error, "session row creation failed; continuing locally");
            }
        }

        let state = CheckState::new(Arc::clone(&self.bank)).apply(CheckEvent::Start);
        CheckRun { state, session }
    }

    /// Record the selected option for the current question and advance.
    pub fn answer(&self, run: &mut CheckRun, label: impl Into<String>) {
        run.state = run.state.clone().apply(CheckEvent::Answer {
            label: label.into(),
        });
    }

    /// Step back one question.
    pub fn back(&self, run: &mut CheckRun) {
        run.state = run.state.clone().apply(CheckEvent::Back);
    }

    /// Compute the report for the current answers.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Scoring` only if the bank is empty, which the
    /// fixed bank rules out.
    pub fn report(&self, run: &CheckRun) -> Result<ScoreReport, FlowError> {
        let outcome = scoring::score(&self.bank, run.state.answers())?;
        Ok(ScoreReport {
            outcome,
            band: outcome.band(&self.thresholds),
        })
    }

    /// Enter the results page: compute the report and finalize the session
    /// at most once.
    ///
    /// Safe to call on every render of the results page; the session's
    /// finalized flag makes repeat calls pure.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotAtResults` when the quiz has not been
    /// completed, and `FlowError::Scoring` only for an empty bank. Remote
    /// failures are carried in `ResultsEntry::finalize_error` instead.
    pub async fn enter_results(&self, run: &mut CheckRun) -> Result<ResultsEntry, FlowError> {
        if run.state.page() != Page::Results {
            return Err(FlowError::NotAtResults);
        }
        let report = self.report(run)?;
        let finalize_error = self.finalize_once(run, &report).await;
        Ok(ResultsEntry {
            report,
            finalize_error,
        })
    }

    async fn finalize_once(&self, run: &mut CheckRun, report: &ScoreReport) -> Option<StorageError> {
        if run.session.is_finalized() {
            return None;
        }
        let completed_at = self.clock.now();
        run.session
            .mark_finalized(report.outcome.percentage(), report.band, completed_at);

        let Some(row_id) = run.session.remote_id() else {
            tracing::debug!("no remote session row; finalize skipped");
            return None;
        };
        match self
            .sessions
            .finalize_session(row_id, report.outcome.percentage(), report.band, completed_at)
            .await
        {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!(%error, "session finalize failed");
                Some(error)
            }
        }
    }

    /// Email capture on the results page: validate, resolve the contact,
    /// write the result row, and move on to booking.
    ///
    /// Idempotent: a second submission returns `AlreadySubmitted` without
    /// touching the network.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotAtResults` off the results page and
    /// `FlowError::Email` for a malformed address; neither makes a remote
    /// call. Returns `FlowError::Storage` when the contact cannot be
    /// resolved. A failed result write does not fail the capture; it is
    /// carried in `EmailCapture::Submitted::result_error`.
    pub async fn submit_email(
        &self,
        run: &mut CheckRun,
        raw_email: &str,
    ) -> Result<EmailCapture, FlowError> {
        if run.state.email_submitted() {
            return Ok(EmailCapture::AlreadySubmitted);
        }
        if run.state.page() != Page::Results {
            return Err(FlowError::NotAtResults);
        }

        let email = EmailAddress::parse(raw_email)?;
        let report = self.report(run)?;
        let contact = self.find_or_create_contact(&email).await?;

        let result = NewResult {
            contact,
            session: run.session.remote_id(),
            session_token: run.session.token().clone(),
            overall_score: report.outcome.percentage(),
            max_score: report.outcome.max(),
            band: report.band,
            breakdown: scoring::breakdown(&self.bank, run.state.answers()),
            report_status: ReportStatus::Requested,
            created_at: self.clock.now(),
        };
        let result_error = match self.results.create_result(&result).await {
            Ok(_) => None,
            Err(error) => {
                tracing::warn!(%error, "result row creation failed");
                Some(error)
            }
        };

        run.state = run.state.clone().apply(CheckEvent::EmailCaptured);
        Ok(EmailCapture::Submitted {
            contact,
            result_error,
        })
    }

    /// Resolve a contact id for an email, creating the row only when the
    /// lookup finds nothing.
    ///
    /// Read then conditionally write, with no locking: two concurrent
    /// submissions of a new email can both create a row. Known limitation;
    /// the store is non-transactional.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Storage` when the lookup or the create fails;
    /// a failed lookup is never treated as "absent".
    pub async fn find_or_create_contact(
        &self,
        email: &EmailAddress,
    ) -> Result<ContactId, FlowError> {
        if let Some(existing) = self.contacts.find_contact_by_email(email).await? {
            return Ok(existing);
        }
        let contact = NewContact::from_email(email.clone(), self.clock.now());
        Ok(self.contacts.create_contact(&contact).await?)
    }

    /// Direct finish on the results page: re-confirm finalization and move
    /// on to booking without email capture.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotAtResults` when the quiz has not been
    /// completed, and `FlowError::Scoring` only for an empty bank.
    pub async fn finish(&self, run: &mut CheckRun) -> Result<(), FlowError> {
        if run.state.page() != Page::Results {
            return Err(FlowError::NotAtResults);
        }
        let report = self.report(run)?;
        self.finalize_once(run, &report).await;
        run.state = run.state.clone().apply(CheckEvent::Finish);
        Ok(())
    }
}
