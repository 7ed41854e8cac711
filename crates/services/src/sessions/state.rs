use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, rng};

use quiz_core::model::{FinishReason, Question, QuizConfig, ScoreReport};
use quiz_core::time::remaining_until;

use super::present::{PresentedQuestion, present_options};
use super::progress::QuizProgress;
use crate::error::QuizError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Configuring,
    InProgress,
    Finished,
}

/// Result of a navigation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizStep {
    /// Still in progress, showing the question at `index`.
    Continue { index: usize },
    /// The quiz is now finished.
    Finished(FinishReason),
}

struct ActiveQuiz {
    config: QuizConfig,
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<usize, String>,
    started_at: DateTime<Utc>,
}

impl ActiveQuiz {
    fn deadline(&self) -> DateTime<Utc> {
        self.started_at + self.config.time_limit()
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline()
    }

    fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }
}

enum QuizState {
    Configuring,
    InProgress(ActiveQuiz),
    Finished {
        quiz: ActiveQuiz,
        finished_at: DateTime<Utc>,
        report: ScoreReport,
    },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One student's exam attempt, from configuration to results.
///
/// Every event handler takes `now` from the caller's clock. Handlers on an
/// in-progress quiz check the time limit first: once it has passed the quiz
/// is finished as timed out and the requested action is dropped.
pub struct QuizSession {
    state: QuizState,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: QuizState::Configuring,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self.state {
            QuizState::Configuring => QuizPhase::Configuring,
            QuizState::InProgress(_) => QuizPhase::InProgress,
            QuizState::Finished { .. } => QuizPhase::Finished,
        }
    }

    fn quiz(&self) -> Option<&ActiveQuiz> {
        match &self.state {
            QuizState::Configuring => None,
            QuizState::InProgress(quiz) | QuizState::Finished { quiz, .. } => Some(quiz),
        }
    }

    #[must_use]
    pub fn config(&self) -> Option<&QuizConfig> {
        self.quiz().map(|quiz| &quiz.config)
    }

    /// Questions selected for this attempt, in quiz order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        self.quiz().map_or(&[], |quiz| quiz.questions.as_slice())
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.quiz().map(|quiz| quiz.started_at)
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            QuizState::Finished { finished_at, .. } => Some(*finished_at),
            _ => None,
        }
    }

    /// Zero-based index of the current question while in progress.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            QuizState::InProgress(quiz) => Some(quiz.current),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            QuizState::InProgress(quiz) => quiz.questions.get(quiz.current),
            _ => None,
        }
    }

    /// Recorded option text for the question at `index`.
    #[must_use]
    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.quiz()
            .and_then(|quiz| quiz.answers.get(&index))
            .map(String::as_str)
    }

    #[must_use]
    pub fn progress(&self) -> Option<QuizProgress> {
        match &self.state {
            QuizState::InProgress(quiz) => Some(QuizProgress {
                current: quiz.current,
                total: quiz.questions.len(),
                answered: quiz.answers.len(),
                is_last: quiz.is_last(),
            }),
            _ => None,
        }
    }

    /// Time left before the limit, saturating at zero. `None` unless in progress.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        match &self.state {
            QuizState::InProgress(quiz) => Some(remaining_until(quiz.deadline(), now)),
            _ => None,
        }
    }

    #[must_use]
    pub fn report(&self) -> Option<&ScoreReport> {
        match &self.state {
            QuizState::Finished { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Begin the quiz with an already selected set of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` unless configuring, and
    /// `QuizError::EmptyBank` if `questions` is empty.
    pub fn start(
        &mut self,
        config: QuizConfig,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<(), QuizError> {
        if !matches!(self.state, QuizState::Configuring) {
            return Err(QuizError::AlreadyStarted);
        }
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        self.state = QuizState::InProgress(ActiveQuiz {
            config,
            questions,
            current: 0,
            answers: BTreeMap::new(),
            started_at,
        });
        Ok(())
    }

    /// Apply the time limit without any other action.
    ///
    /// Returns true if this call finished the quiz.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        let expired = matches!(&self.state, QuizState::InProgress(quiz) if quiz.is_expired(now));
        if expired {
            self.finish_with(FinishReason::TimedOut, now);
        }
        expired
    }

    /// Go back one question. A no-op on the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` unless a quiz is running.
    pub fn previous(&mut self, now: DateTime<Utc>) -> Result<QuizStep, QuizError> {
        if self.refresh(now) {
            return Ok(QuizStep::Finished(FinishReason::TimedOut));
        }
        let QuizState::InProgress(quiz) = &mut self.state else {
            return Err(QuizError::NotInProgress);
        };
        quiz.current = quiz.current.saturating_sub(1);
        Ok(QuizStep::Continue {
            index: quiz.current,
        })
    }

    /// Record `selection` for the current question, then advance or finish.
    ///
    /// `selection` is the option text chosen by the student; `None` leaves the
    /// question's recorded answer as it is.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` unless a quiz is running, and
    /// `QuizError::UnknownOption` if `selection` is not an option of the
    /// current question.
    pub fn next(
        &mut self,
        selection: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<QuizStep, QuizError> {
        if self.refresh(now) {
            return Ok(QuizStep::Finished(FinishReason::TimedOut));
        }
        let QuizState::InProgress(quiz) = &mut self.state else {
            return Err(QuizError::NotInProgress);
        };

        if let Some(text) = selection {
            let question = &quiz.questions[quiz.current];
            if !question.options().contains_text(text) {
                return Err(QuizError::UnknownOption {
                    option: text.to_string(),
                });
            }
            quiz.answers.insert(quiz.current, text.to_string());
        }

        if quiz.is_last() {
            self.finish_with(FinishReason::Completed, now);
            return Ok(QuizStep::Finished(FinishReason::Completed));
        }
        quiz.current += 1;
        Ok(QuizStep::Continue {
            index: quiz.current,
        })
    }

    /// Finish the running quiz immediately and score it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` unless a quiz is running.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<&ScoreReport, QuizError> {
        if !self.refresh(now) {
            if !matches!(self.state, QuizState::InProgress(_)) {
                return Err(QuizError::NotInProgress);
            }
            self.finish_with(FinishReason::Completed, now);
        }
        self.report().ok_or(QuizError::NotInProgress)
    }

    /// Discard the finished attempt and return to configuration.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` unless the quiz has finished.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        if !matches!(self.state, QuizState::Finished { .. }) {
            return Err(QuizError::NotFinished);
        }
        self.state = QuizState::Configuring;
        Ok(())
    }

    /// Present the current question, shuffling options per call if configured.
    #[must_use]
    pub fn present_current(&self) -> Option<PresentedQuestion> {
        self.present_current_with(&mut rng())
    }

    pub fn present_current_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PresentedQuestion> {
        let QuizState::InProgress(quiz) = &self.state else {
            return None;
        };
        let question = quiz.questions.get(quiz.current)?;
        Some(PresentedQuestion {
            number: quiz.current + 1,
            total: quiz.questions.len(),
            text: question.text().to_string(),
            category: question.category().to_string(),
            options: present_options(question, quiz.config.shuffle_options(), rng),
            selected: quiz.answers.get(&quiz.current).cloned(),
            is_first: quiz.current == 0,
            is_last: quiz.is_last(),
        })
    }

    fn finish_with(&mut self, reason: FinishReason, now: DateTime<Utc>) {
        let state = std::mem::replace(&mut self.state, QuizState::Configuring);
        self.state = match state {
            QuizState::InProgress(quiz) => {
                let report =
                    ScoreReport::from_answers(&quiz.config, &quiz.questions, &quiz.answers, reason);
                QuizState::Finished {
                    quiz,
                    finished_at: now,
                    report,
                }
            }
            other => other,
        };
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quiz = self.quiz();
        f.debug_struct("QuizSession")
            .field("phase", &self.phase())
            .field("questions_len", &quiz.map_or(0, |q| q.questions.len()))
            .field("current", &self.current_index())
            .field("answers_len", &quiz.map_or(0, |q| q.answers.len()))
            .field("started_at", &self.started_at())
            .field("finished_at", &self.finished_at())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
