//! Reduces an answer set into a percentage score and its band.
//!
//! Scoring is a pure function of the answer set: unanswered questions add
//! nothing to the total but their maximum still counts toward the
//! denominator, so a partial run is penalized rather than rejected.

use thiserror::Error;

use crate::model::{AnswerSet, BandThresholds, HealthBand, QuestionBank};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("cannot score against an empty question bank")]
    EmptyBank,

    #[error("question bank awards no points")]
    ZeroPointBank,
}

/// Outcome of scoring one answer set against the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    total: u32,
    max: u32,
    percentage: u8,
}

impl ScoreOutcome {
    /// Points actually awarded.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Highest attainable total for the bank.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// `floor(100 * total / max)`, always in [0, 100].
    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Classify this outcome under the given thresholds.
    #[must_use]
    pub fn band(&self, thresholds: &BandThresholds) -> HealthBand {
        thresholds.classify(self.percentage)
    }
}

/// Score an answer set against the bank.
///
/// A selection whose label no longer matches any option awards 0, the same
/// as an unanswered question.
///
/// # Errors
///
/// Returns `ScoringError::EmptyBank` if the bank holds no questions. The
/// fixed bank makes this practically unreachable, but the division guard is
/// explicit rather than assumed.
#[allow(clippy::cast_possible_truncation)] // total <= max, so the quotient fits in u8
pub fn score(bank: &QuestionBank, answers: &AnswerSet) -> Result<ScoreOutcome, ScoringError> {
    if bank.is_empty() {
        return Err(ScoringError::EmptyBank);
    }

    let mut total = 0u32;
    let mut max = 0u32;
    for (ordinal, question) in bank.questions().iter().enumerate() {
        if let Some(label) = answers.selected(ordinal) {
            total += question.points_for(label).unwrap_or(0);
        }
        max += question.max_points();
    }

    if max == 0 {
        return Err(ScoringError::ZeroPointBank);
    }

    let percentage = (u64::from(total) * 100 / u64::from(max)) as u8;
    Ok(ScoreOutcome {
        total,
        max,
        percentage,
    })
}

/// Awarded points per question ordinal, 0 when unanswered.
///
/// Used only for persistence; the percentage never derives from this.
#[must_use]
pub fn breakdown(bank: &QuestionBank, answers: &AnswerSet) -> Vec<u32> {
    bank.questions()
        .iter()
        .enumerate()
        .map(|(ordinal, question)| {
            answers
                .selected(ordinal)
                .and_then(|label| question.points_for(label))
                .unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, Question, QuestionBank};

    fn answer_all_best(bank: &QuestionBank) -> AnswerSet {
        let mut answers = AnswerSet::new();
        for (ordinal, question) in bank.questions().iter().enumerate() {
            let best = question
                .options()
                .iter()
                .max_by_key(|option| option.points())
                .unwrap();
            answers.record(ordinal, best.label());
        }
        answers
    }

    #[test]
    fn all_best_answers_score_100_and_classify_healthy() {
        let bank = QuestionBank::inventory_health();
        let answers = answer_all_best(&bank);

        let outcome = score(&bank, &answers).unwrap();
        assert_eq!(outcome.total(), 100);
        assert_eq!(outcome.max(), 100);
        assert_eq!(outcome.percentage(), 100);
        assert_eq!(outcome.band(&BandThresholds::default()), HealthBand::Healthy);
    }

    #[test]
    fn empty_answer_set_scores_zero_and_classifies_critical() {
        let bank = QuestionBank::inventory_health();
        let outcome = score(&bank, &AnswerSet::new()).unwrap();
        assert_eq!(outcome.total(), 0);
        assert_eq!(outcome.percentage(), 0);
        assert_eq!(
            outcome.band(&BandThresholds::default()),
            HealthBand::Critical
        );
    }

    #[test]
    fn mixed_answers_score_63_and_classify_at_risk() {
        // Awarded per question: 20, 14, 7, 14, 8 on a 100-point max.
        let bank = QuestionBank::inventory_health();
        let picks = [0usize, 1, 2, 1, 2];
        let mut answers = AnswerSet::new();
        for (ordinal, pick) in picks.into_iter().enumerate() {
            let label = bank.question(ordinal).unwrap().options()[pick].label();
            answers.record(ordinal, label);
        }

        let outcome = score(&bank, &answers).unwrap();
        assert_eq!(outcome.total(), 63);
        assert_eq!(outcome.percentage(), 63);
        assert_eq!(outcome.band(&BandThresholds::default()), HealthBand::AtRisk);
    }

    #[test]
    fn partial_answers_are_penalized_not_rejected() {
        let bank = QuestionBank::inventory_health();
        let mut answers = AnswerSet::new();
        answers.record(0, "Less than 10%");

        let outcome = score(&bank, &answers).unwrap();
        assert_eq!(outcome.total(), 20);
        assert_eq!(outcome.max(), 100);
        assert_eq!(outcome.percentage(), 20);
    }

    #[test]
    fn percentage_floors_toward_zero() {
        let yes_no = || vec![AnswerOption::new("yes", 1), AnswerOption::new("no", 0)];
        let bank = QuestionBank::new(vec![
            Question::new("a", yes_no()),
            Question::new("b", yes_no()),
            Question::new("c", yes_no()),
        ])
        .unwrap();
        let mut answers = AnswerSet::new();
        answers.record(0, "yes");

        let outcome = score(&bank, &answers).unwrap();
        // 1/3 = 33.33..., floored.
        assert_eq!(outcome.percentage(), 33);
    }

    #[test]
    fn zero_point_bank_is_a_scoring_error_not_a_division_by_zero() {
        let bank = QuestionBank::new(vec![Question::new(
            "a",
            vec![AnswerOption::new("only", 0)],
        )])
        .unwrap();
        let err = score(&bank, &AnswerSet::new()).unwrap_err();
        assert_eq!(err, ScoringError::ZeroPointBank);
    }

    #[test]
    fn stale_labels_award_nothing() {
        let bank = QuestionBank::inventory_health();
        let mut answers = AnswerSet::new();
        answers.record(0, "an option that was renamed");

        let outcome = score(&bank, &answers).unwrap();
        assert_eq!(outcome.total(), 0);
    }

    #[test]
    fn breakdown_mirrors_selections() {
        let bank = QuestionBank::inventory_health();
        let mut answers = AnswerSet::new();
        answers.record(0, "Less than 10%");
        answers.record(3, "5\u{2013}15 hours");

        assert_eq!(breakdown(&bank, &answers), vec![20, 0, 0, 14, 0]);
    }

    #[test]
    fn percentage_is_bounded_for_arbitrary_partial_sets() {
        let bank = QuestionBank::inventory_health();
        for upto in 0..=bank.len() {
            let mut answers = AnswerSet::new();
            for ordinal in 0..upto {
                let label = bank.question(ordinal).unwrap().options()[1].label();
                answers.record(ordinal, label);
            }
            let outcome = score(&bank, &answers).unwrap();
            assert!(outcome.percentage() <= 100);
            assert_eq!(
                u64::from(outcome.percentage()),
                u64::from(outcome.total()) * 100 / u64::from(outcome.max())
            );
        }
    }
}
