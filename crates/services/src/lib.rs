#![forbid(unsafe_code)]

pub mod error;
pub mod question_bank_service;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{BankError, QuizError};
pub use question_bank_service::QuestionBankService;

pub use sessions::{
    PresentedOption, PresentedQuestion, QuizBuilder, QuizLoopService, QuizPhase, QuizProgress,
    QuizSession, QuizStep,
};
