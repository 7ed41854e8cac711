use std::sync::Arc;

use quiz_core::model::{QuizConfigDraft, ScoreReport};
use tracing::{debug, info};

use super::plan::QuizBuilder;
use super::state::{QuizSession, QuizStep};
use crate::Clock;
use crate::error::QuizError;
use crate::question_bank_service::QuestionBankService;

/// Drives a `QuizSession` with the service clock and the question bank.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    bank: Arc<QuestionBankService>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBankService>) -> Self {
        Self { clock, bank }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.bank)
    }

    /// Validate the exam form, select questions and start the quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` if there is nothing to ask,
    /// `QuizError::Config` for invalid form input, and
    /// `QuizError::AlreadyStarted` if `session` is not configuring.
    pub async fn start(
        &self,
        session: &mut QuizSession,
        draft: QuizConfigDraft,
    ) -> Result<(), QuizError> {
        let bank = self.bank.questions().await;
        if bank.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        let config = draft.validate(bank.len())?;
        let questions = QuizBuilder::new()
            .with_shuffle(config.shuffle_questions())
            .build(&bank, config.question_count());

        info!(
            student = config.student_name(),
            grade = config.student_grade(),
            questions = questions.len(),
            time_limit_secs = config.time_limit_secs(),
            "quiz started"
        );
        session.start(config, questions, self.clock.now())
    }

    /// Check the time limit. Returns true if the quiz just timed out.
    pub fn refresh(&self, session: &mut QuizSession) -> bool {
        let timed_out = session.refresh(self.clock.now());
        if timed_out {
            log_finished(self.clock, session);
        }
        timed_out
    }

    /// Go back one question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` unless a quiz is running.
    pub fn previous(&self, session: &mut QuizSession) -> Result<QuizStep, QuizError> {
        let step = session.previous(self.clock.now())?;
        self.after_step(session, step);
        Ok(step)
    }

    /// Record `selection` and advance, finishing after the last question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` unless a quiz is running, or
    /// `QuizError::UnknownOption` for a selection that is not an option.
    pub fn next(
        &self,
        session: &mut QuizSession,
        selection: Option<&str>,
    ) -> Result<QuizStep, QuizError> {
        let step = session.next(selection, self.clock.now())?;
        self.after_step(session, step);
        Ok(step)
    }

    /// Finish the running quiz now and return its report.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` unless a quiz is running.
    pub fn finish<'a>(&self, session: &'a mut QuizSession) -> Result<&'a ScoreReport, QuizError> {
        session.finish(self.clock.now())?;
        log_finished(self.clock, session);
        session.report().ok_or(QuizError::NotInProgress)
    }

    /// Discard a finished attempt ("take another exam").
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` unless the quiz has finished.
    pub fn restart(&self, session: &mut QuizSession) -> Result<(), QuizError> {
        session.restart()?;
        debug!("quiz session reset");
        Ok(())
    }

    fn after_step(&self, session: &QuizSession, step: QuizStep) {
        match step {
            QuizStep::Continue { index } => debug!(index, "moved to question"),
            QuizStep::Finished(_) => log_finished(self.clock, session),
        }
    }
}

fn log_finished(clock: Clock, session: &QuizSession) {
    if let Some(report) = session.report() {
        let elapsed_secs = session
            .started_at()
            .map(|started_at| clock.elapsed_since(started_at).num_seconds());
        info!(
            student = report.student_name(),
            elapsed_secs,
            score = report.score(),
            total = report.total(),
            percentage = %report.percentage_label(),
            reason = ?report.reason(),
            "quiz finished"
        );
    }
}
