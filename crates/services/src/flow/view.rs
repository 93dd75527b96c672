use quickcheck_core::model::AnswerOption;

use super::state::{CheckState, Page};
use super::workflow::ScoreReport;

/// Presentation-agnostic view of the question under the cursor.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no layout or styling assumptions
///
/// The front end decides how to render option lists, progress, and buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    /// Zero-based question ordinal.
    pub ordinal: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
    /// Option index to pre-select: the recorded answer, else the first.
    pub preselected: usize,
    /// False on the first question, where no Back action is offered.
    pub can_go_back: bool,
    /// True when answering moves to the results page instead of advancing.
    pub is_last: bool,
}

impl QuizView {
    /// Build the view for the current question, if the state is on the
    /// quiz page.
    #[must_use]
    pub fn from_state(state: &CheckState) -> Option<Self> {
        if state.page() != Page::Quiz {
            return None;
        }
        let question = state.current_question()?;
        let ordinal = state.current_ordinal();
        Some(Self {
            ordinal,
            total: state.bank().len(),
            prompt: question.prompt().to_string(),
            options: question
                .options()
                .iter()
                .map(AnswerOption::label)
                .map(str::to_string)
                .collect(),
            preselected: state.preselected_index(),
            can_go_back: ordinal > 0,
            is_last: ordinal + 1 == state.bank().len(),
        })
    }
}

/// Presentation-agnostic view of the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPageView {
    pub percentage: u8,
    pub max_score: u32,
    pub band_label: &'static str,
    pub band_color: &'static str,
    pub headline: &'static str,
    pub message: &'static str,
    /// When true the email form is replaced by a static acknowledgement.
    pub email_submitted: bool,
}

impl ResultsPageView {
    #[must_use]
    pub fn new(report: &ScoreReport, email_submitted: bool) -> Self {
        Self {
            percentage: report.outcome.percentage(),
            max_score: report.outcome.max(),
            band_label: report.band.label(),
            band_color: report.band.color(),
            headline: report.band.headline(),
            message: report.band.message(),
            email_submitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_core::model::QuestionBank;
    use std::sync::Arc;

    use crate::flow::CheckEvent;

    #[test]
    fn quiz_view_exists_only_on_the_quiz_page() {
        let state = CheckState::new(Arc::new(QuestionBank::inventory_health()));
        assert!(QuizView::from_state(&state).is_none());

        let state = state.apply(CheckEvent::Start);
        let view = QuizView::from_state(&state).unwrap();
        assert_eq!(view.ordinal, 0);
        assert_eq!(view.total, 5);
        assert_eq!(view.options.len(), 4);
        assert!(!view.can_go_back);
        assert!(!view.is_last);
    }

    #[test]
    fn last_question_is_flagged() {
        let mut state =
            CheckState::new(Arc::new(QuestionBank::inventory_health())).apply(CheckEvent::Start);
        for _ in 0..4 {
            let label = state.current_question().unwrap().options()[0]
                .label()
                .to_string();
            state = state.apply(CheckEvent::Answer { label });
        }
        let view = QuizView::from_state(&state).unwrap();
        assert_eq!(view.ordinal, 4);
        assert!(view.can_go_back);
        assert!(view.is_last);
    }
}
