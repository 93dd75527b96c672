use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank must contain at least one question")]
    EmptyBank,

    #[error("question {ordinal} has no answer options")]
    NoOptions { ordinal: usize },
}

/// A single selectable answer with the points it awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    label: String,
    points: u32,
}

impl AnswerOption {
    #[must_use]
    pub fn new(label: impl Into<String>, points: u32) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }
}

/// One multiple-choice question with its scored options.
///
/// Options and their point values are a single list, so the two can never
/// fall out of cardinality with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    options: Vec<AnswerOption>,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Highest attainable point value for this question.
    #[must_use]
    pub fn max_points(&self) -> u32 {
        self.options.iter().map(AnswerOption::points).max().unwrap_or(0)
    }

    /// Points awarded for the option with the given label, if it exists.
    #[must_use]
    pub fn points_for(&self, label: &str) -> Option<u32> {
        self.options
            .iter()
            .find(|option| option.label() == label)
            .map(AnswerOption::points)
    }

    /// Position of the option with the given label, if it exists.
    #[must_use]
    pub fn option_index(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|option| option.label() == label)
    }
}

/// Fixed, ordered list of questions. Built once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from the given questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::EmptyBank` for an empty list and
    /// `QuestionBankError::NoOptions` if any question has no options.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::EmptyBank);
        }
        for (ordinal, question) in questions.iter().enumerate() {
            if question.options().is_empty() {
                return Err(QuestionBankError::NoOptions { ordinal });
            }
        }
        Ok(Self { questions })
    }

    /// The five-question inventory health rubric.
    ///
    /// # Panics
    ///
    /// Never panics in practice: the static definition is non-empty and every
    /// question carries options.
    #[must_use]
    pub fn inventory_health() -> Self {
        let questions = vec![
            Question::new(
                "Approximately what percentage of your inventory has not sold \
                 or been consumed in the past 6 months?",
                vec![
                    AnswerOption::new("Less than 10%", 20),
                    AnswerOption::new("10\u{2013}25%", 15),
                    AnswerOption::new("25\u{2013}50%", 8),
                    AnswerOption::new("More than 50%", 0),
                ],
            ),
            Question::new(
                "How often do you experience stockouts or shortages of your \
                 highest-demand SKUs or materials?",
                vec![
                    AnswerOption::new("Rarely (once or twice per year)", 20),
                    AnswerOption::new("Occasionally (every few months)", 14),
                    AnswerOption::new("Frequently (monthly)", 7),
                    AnswerOption::new("Very frequently (weekly or ongoing)", 0),
                ],
            ),
            Question::new(
                "Which best describes your current inventory position relative to demand?",
                vec![
                    AnswerOption::new("Inventory levels closely match demand patterns", 20),
                    AnswerOption::new("Generally balanced, with some overstock", 14),
                    AnswerOption::new("Noticeable overstock in slow-moving or seasonal items", 7),
                    AnswerOption::new("Significant mismatch between inventory and actual demand", 0),
                ],
            ),
            Question::new(
                "Approximately how much time does your team spend each week \
                 addressing inventory-related issues (manual checks, expediting, \
                 exceptions, rework)?",
                vec![
                    AnswerOption::new("Less than 5 hours", 20),
                    AnswerOption::new("5\u{2013}15 hours", 14),
                    AnswerOption::new("15\u{2013}30 hours", 7),
                    AnswerOption::new("More than 30 hours", 0),
                ],
            ),
            Question::new(
                "How frequently does your inventory turn over, on average? \
                 (If unsure, choose the closest estimate.)",
                vec![
                    AnswerOption::new("Monthly or faster", 20),
                    AnswerOption::new("Every 2\u{2013}3 months", 15),
                    AnswerOption::new("Every 4\u{2013}6 months", 8),
                    AnswerOption::new("Less than twice per year", 0),
                ],
            ),
        ];

        Self::new(questions).expect("static question bank is well-formed")
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: the constructor rejects empty banks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn question(&self, ordinal: usize) -> Option<&Question> {
        self.questions.get(ordinal)
    }

    /// Sum of each question's highest option value.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::max_points).sum()
    }
}
