mod config;
mod label;
mod question;
mod report;

pub use config::{ConfigError, QuizConfig, QuizConfigDraft};
pub use label::{OptionLabel, ParseLabelError};
pub use question::{Question, QuestionDraft, QuestionError, QuestionField, QuestionOptions};
pub use report::{FinishReason, NOT_ANSWERED, ReviewItem, ScoreReport};
