use std::collections::BTreeMap;

use crate::model::{Question, QuizConfig};

/// Text shown in place of an answer the student never gave.
pub const NOT_ANSWERED: &str = "not answered";

/// How a quiz reached the finished state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishReason {
    /// The student moved past the last question.
    Completed,
    /// The time limit expired before the student finished.
    TimedOut,
}

/// Review line for a single question of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    number: usize,
    question: String,
    answer: Option<String>,
    correct_answer: String,
    is_correct: bool,
}

impl ReviewItem {
    /// 1-based position of the question in the quiz.
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// The student's answer, or `NOT_ANSWERED`.
    #[must_use]
    pub fn answer_display(&self) -> &str {
        self.answer.as_deref().unwrap_or(NOT_ANSWERED)
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

/// Scored result of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    student_name: String,
    student_grade: String,
    reason: FinishReason,
    score: usize,
    items: Vec<ReviewItem>,
}

impl ScoreReport {
    /// Score `answers` (question index to chosen option text) against the
    /// canonical answers of `questions`.
    ///
    /// Answers are compared by text, so the result does not depend on the
    /// order the options were displayed in. Missing answers are incorrect.
    #[must_use]
    pub fn from_answers(
        config: &QuizConfig,
        questions: &[Question],
        answers: &BTreeMap<usize, String>,
        reason: FinishReason,
    ) -> Self {
        let items: Vec<ReviewItem> = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let answer = answers.get(&index).cloned();
                let is_correct = answer
                    .as_deref()
                    .is_some_and(|text| question.is_correct_text(text));
                ReviewItem {
                    number: index + 1,
                    question: question.text().to_string(),
                    answer,
                    correct_answer: question.correct_text().to_string(),
                    is_correct,
                }
            })
            .collect();
        let score = items.iter().filter(|item| item.is_correct).count();

        Self {
            student_name: config.student_name().to_string(),
            student_grade: config.student_grade().to_string(),
            reason,
            score,
            items,
        }
    }

    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub fn student_grade(&self) -> &str {
        &self.student_grade
    }

    #[must_use]
    pub fn reason(&self) -> FinishReason {
        self.reason
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Share of correct answers in percent.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.score as f64 / self.items.len() as f64 * 100.0
    }

    /// Percentage with two decimals, e.g. `"66.67"`.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.2}", self.percentage())
    }
}
