use chrono::Duration;
use thiserror::Error;

/// Default number of questions offered by the exam form.
const DEFAULT_QUESTION_COUNT: usize = 5;
/// Default time limit offered by the exam form.
const DEFAULT_TIME_LIMIT_MINUTES: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("student name cannot be empty")]
    EmptyStudentName,

    #[error("student grade cannot be empty")]
    EmptyStudentGrade,

    #[error("question count must be between 1 and {max}, got {requested}")]
    InvalidQuestionCount { requested: usize, max: usize },

    #[error("time limit must be at least 1 minute")]
    InvalidTimeLimit,
}

/// Raw exam form input, validated against the current bank size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfigDraft {
    pub student_name: String,
    pub student_grade: String,
    pub question_count: usize,
    pub time_limit_minutes: u32,
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
}

impl QuizConfigDraft {
    /// Form defaults for a bank holding `bank_size` questions.
    #[must_use]
    pub fn defaults_for(bank_size: usize) -> Self {
        Self {
            student_name: String::new(),
            student_grade: String::new(),
            question_count: DEFAULT_QUESTION_COUNT.min(bank_size).max(1),
            time_limit_minutes: DEFAULT_TIME_LIMIT_MINUTES,
            shuffle_questions: true,
            shuffle_options: true,
        }
    }

    /// Validate the draft for a bank of `bank_size` questions.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the name or grade is empty, the question count
    /// is outside `1..=bank_size`, or the time limit is zero.
    pub fn validate(self, bank_size: usize) -> Result<QuizConfig, ConfigError> {
        let student_name = self.student_name.trim().to_string();
        if student_name.is_empty() {
            return Err(ConfigError::EmptyStudentName);
        }
        let student_grade = self.student_grade.trim().to_string();
        if student_grade.is_empty() {
            return Err(ConfigError::EmptyStudentGrade);
        }
        if self.question_count == 0 || self.question_count > bank_size {
            return Err(ConfigError::InvalidQuestionCount {
                requested: self.question_count,
                max: bank_size,
            });
        }
        if self.time_limit_minutes == 0 {
            return Err(ConfigError::InvalidTimeLimit);
        }

        Ok(QuizConfig {
            student_name,
            student_grade,
            question_count: self.question_count,
            time_limit_secs: u64::from(self.time_limit_minutes) * 60,
            shuffle_questions: self.shuffle_questions,
            shuffle_options: self.shuffle_options,
        })
    }
}

/// Validated exam configuration, fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    student_name: String,
    student_grade: String,
    question_count: usize,
    time_limit_secs: u64,
    shuffle_questions: bool,
    shuffle_options: bool,
}

impl QuizConfig {
    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub fn student_grade(&self) -> &str {
        &self.student_grade
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u64 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        Duration::seconds(i64::try_from(self.time_limit_secs).unwrap_or(i64::MAX))
    }

    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }

    #[must_use]
    pub fn shuffle_options(&self) -> bool {
        self.shuffle_options
    }
}
