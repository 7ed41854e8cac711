use async_trait::async_trait;
use quiz_core::model::{OptionLabel, Question, QuestionDraft};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonFileRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of a question in the bank file.
///
/// Field names are part of the on-disk format and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionRecord {
    pub question: String,
    pub category: String,
    pub options: BTreeMap<String, String>,
    pub correct: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        let options = question
            .options()
            .iter()
            .map(|(label, text)| (label.as_str().to_string(), text.to_string()))
            .collect();
        Self {
            question: question.text().to_string(),
            category: question.category().to_string(),
            options,
            correct: question.correct().as_str().to_string(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the correct label is not A–D,
    /// an option label is missing or unexpected, or any field fails question
    /// validation.
    pub fn into_question(mut self) -> Result<Question, StorageError> {
        let correct: OptionLabel = self
            .correct
            .parse()
            .map_err(|e: quiz_core::model::ParseLabelError| {
                StorageError::Serialization(e.to_string())
            })?;

        let mut take = |label: OptionLabel| {
            self.options.remove(label.as_str()).ok_or_else(|| {
                StorageError::Serialization(format!("missing option {label}"))
            })
        };
        let options = [
            take(OptionLabel::A)?,
            take(OptionLabel::B)?,
            take(OptionLabel::C)?,
            take(OptionLabel::D)?,
        ];
        if let Some(extra) = self.options.keys().next() {
            return Err(StorageError::Serialization(format!("unexpected option {extra}")));
        }

        QuestionDraft {
            text: self.question,
            category: self.category,
            options,
            correct,
        }
        .validate()
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Repository contract for the question bank.
///
/// The bank is always read and written as a whole.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Load every stored question in stored order.
    ///
    /// Absent or unparsable storage yields an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backend itself cannot be reached.
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Replace the stored bank with `questions`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be written.
    async fn save_questions(&self, questions: &[Question]) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-filled with `questions`.
    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_questions(&self, questions: &[Question]) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = questions.to_vec();
        Ok(())
    }
}

/// Holds the question repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            questions: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Build a `Storage` backed by a JSON file at `path`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            questions: Arc::new(JsonFileRepository::new(path)),
        }
    }
}
