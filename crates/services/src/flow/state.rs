use std::sync::Arc;

use quickcheck_core::model::{AnswerSet, Question, QuestionBank};

use super::progress::CheckProgress;

//
// ─── PAGES & EVENTS ────────────────────────────────────────────────────────────
//

/// The page currently displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Quiz,
    Results,
    Booking,
}

/// User-driven transitions. Remote side effects belong to the flow service,
/// never to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckEvent {
    /// Begin the quiz from the landing page.
    Start,
    /// Record the selected option for the current question and advance;
    /// on the last question this moves to the results page.
    Answer { label: String },
    /// Step back one question without discarding recorded answers.
    Back,
    /// The email capture sub-flow completed on the results page.
    EmailCaptured,
    /// Skip email capture and move on to booking.
    Finish,
    /// Leave booking and reset everything for a fresh run.
    Retake,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Per-session navigation state: page, question cursor, recorded answers.
///
/// State is a value: `apply` consumes the current state and returns the
/// next one, and an event that is invalid for the current page (or carries
/// an unknown option label) returns the state unchanged. The cursor never
/// leaves `[0, N-1]` by construction.
#[derive(Debug, Clone)]
pub struct CheckState {
    bank: Arc<QuestionBank>,
    page: Page,
    current: usize,
    answers: AnswerSet,
    email_submitted: bool,
}

impl CheckState {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            page: Page::Landing,
            current: 0,
            answers: AnswerSet::new(),
            email_submitted: false,
        }
    }

    /// Reducer: fold one event into the state.
    #[must_use]
    pub fn apply(mut self, event: CheckEvent) -> Self {
        match (self.page, event) {
            (Page::Landing, CheckEvent::Start) => {
                self.reset_quiz();
                self.page = Page::Quiz;
            }
            (Page::Quiz, CheckEvent::Answer { label }) => {
                let Some(question) = self.bank.question(self.current) else {
                    return self;
                };
                if question.option_index(&label).is_none() {
                    return self;
                }
                self.answers.record(self.current, label);
                if self.current + 1 < self.bank.len() {
                    self.current += 1;
                } else {
                    self.page = Page::Results;
                }
            }
            (Page::Quiz, CheckEvent::Back) => {
                // Back on the first question is a no-op.
                if self.current > 0 {
                    self.current -= 1;
                }
            }
            (Page::Results, CheckEvent::EmailCaptured) => {
                self.email_submitted = true;
                self.page = Page::Booking;
            }
            (Page::Results, CheckEvent::Finish) => {
                self.page = Page::Booking;
            }
            (Page::Booking, CheckEvent::Retake) => {
                self.reset_quiz();
                self.page = Page::Landing;
            }
            _ => {}
        }
        self
    }

    fn reset_quiz(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.email_submitted = false;
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Zero-based ordinal of the question under the cursor.
    #[must_use]
    pub fn current_ordinal(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.bank.question(self.current)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn email_submitted(&self) -> bool {
        self.email_submitted
    }

    /// Option index to pre-select when rendering the current question:
    /// the previously recorded selection, else the first option.
    #[must_use]
    pub fn preselected_index(&self) -> usize {
        self.answers
            .selected(self.current)
            .and_then(|label| self.current_question()?.option_index(label))
            .unwrap_or(0)
    }

    #[must_use]
    pub fn progress(&self) -> CheckProgress {
        CheckProgress {
            total: self.bank.len(),
            answered: self.answers.len(),
            current: self.current,
            is_complete: matches!(self.page, Page::Results | Page::Booking),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
