use std::fmt;

use thiserror::Error;

use crate::model::label::OptionLabel;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Form field of a question draft, used to point at the field that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionField {
    Text,
    Category,
    Option(OptionLabel),
}

impl fmt::Display for QuestionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("question text"),
            Self::Category => f.write_str("category"),
            Self::Option(label) => write!(f, "option {label}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("{field} cannot be empty")]
    EmptyField { field: QuestionField },
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// The four answer texts of a question, indexed by label.
///
/// Always holds exactly one text per label, so any `OptionLabel` resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOptions {
    texts: [String; 4],
}

impl QuestionOptions {
    #[must_use]
    pub fn get(&self, label: OptionLabel) -> &str {
        &self.texts[label.index()]
    }

    /// Options in canonical A–D order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::ALL
            .into_iter()
            .zip(self.texts.iter().map(String::as_str))
    }

    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t == text)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Raw authoring input for a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub category: String,
    /// Option texts in A–D order.
    pub options: [String; 4],
    pub correct: OptionLabel,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyField` naming the first empty or
    /// whitespace-only field, checked in form order.
    pub fn validate(self) -> Result<Question, QuestionError> {
        require_text(&self.text, QuestionField::Text)?;
        require_text(&self.category, QuestionField::Category)?;
        for (label, text) in OptionLabel::ALL.into_iter().zip(self.options.iter()) {
            require_text(text, QuestionField::Option(label))?;
        }

        Ok(Question {
            text: self.text,
            category: self.category,
            options: QuestionOptions {
                texts: self.options,
            },
            correct: self.correct,
        })
    }
}

fn require_text(value: &str, field: QuestionField) -> Result<(), QuestionError> {
    if value.trim().is_empty() {
        return Err(QuestionError::EmptyField { field });
    }
    Ok(())
}

/// A validated multiple-choice question from the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    category: String,
    options: QuestionOptions,
    correct: OptionLabel,
}

impl Question {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn options(&self) -> &QuestionOptions {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> OptionLabel {
        self.correct
    }

    /// The canonical answer: text of the option under the correct label.
    #[must_use]
    pub fn correct_text(&self) -> &str {
        self.options.get(self.correct)
    }

    /// Returns true if `answer` is the canonical answer text.
    #[must_use]
    pub fn is_correct_text(&self, answer: &str) -> bool {
        self.correct_text() == answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
