//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ConfigError, QuestionError};
use storage::StorageError;

/// Errors emitted by `QuestionBankService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("the question bank is empty, please contact an author")]
    EmptyBank,
    #[error("a quiz is already running")]
    AlreadyStarted,
    #[error("no quiz is in progress")]
    NotInProgress,
    #[error("the quiz has not finished yet")]
    NotFinished,
    #[error("{option:?} is not an option of the current question")]
    UnknownOption { option: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
