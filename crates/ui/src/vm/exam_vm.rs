use chrono::{DateTime, Utc};
use quiz_core::model::{FinishReason, QuizConfigDraft, ScoreReport};
use services::{PresentedQuestion, QuizError, QuizLoopService, QuizPhase, QuizSession, QuizStep};

use crate::views::ViewError;
use crate::vm::time_fmt::format_remaining;

/// Review titles are cut to this many characters.
const REVIEW_TITLE_CHARS: usize = 50;

/// One row of the per-question review.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub title: String,
    pub answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl ReviewRowVm {
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.is_correct {
            "✅ Correct"
        } else {
            "❌ Incorrect"
        }
    }
}

/// Final results screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub student_name: String,
    pub student_grade: String,
    pub score_label: String,
    pub percentage_label: String,
    pub timed_out: bool,
    pub rows: Vec<ReviewRowVm>,
}

impl From<&ScoreReport> for ResultsVm {
    fn from(report: &ScoreReport) -> Self {
        let rows = report
            .items()
            .iter()
            .map(|item| ReviewRowVm {
                title: review_title(item.number(), item.question()),
                answer: item.answer_display().to_string(),
                correct_answer: item.correct_answer().to_string(),
                is_correct: item.is_correct(),
            })
            .collect();
        Self {
            student_name: report.student_name().to_string(),
            student_grade: report.student_grade().to_string(),
            score_label: format!("{} / {}", report.score(), report.total()),
            percentage_label: format!("{}%", report.percentage_label()),
            timed_out: report.reason() == FinishReason::TimedOut,
            rows,
        }
    }
}

fn review_title(number: usize, question: &str) -> String {
    let mut chars = question.chars();
    let head: String = chars.by_ref().take(REVIEW_TITLE_CHARS).collect();
    if chars.next().is_some() {
        format!("Question {number}: {head}...")
    } else {
        format!("Question {number}: {head}")
    }
}

/// Exam screen state: the quiz session plus the question as currently shown.
///
/// Options are shuffled once each time a question is brought on screen, so
/// picking an answer does not reorder them.
#[derive(Debug, Default)]
pub struct QuizVm {
    session: QuizSession,
    shown: Option<PresentedQuestion>,
    selection: Option<String>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        let mut vm = Self {
            session,
            shown: None,
            selection: None,
        };
        vm.show_current();
        vm
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn question(&self) -> Option<&PresentedQuestion> {
        self.shown.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Pick an option. Ignored if the time limit has already passed.
    pub fn select(&mut self, quiz_loop: &QuizLoopService, text: String) {
        if !self.refresh(quiz_loop) {
            self.selection = Some(text);
        }
    }

    /// Countdown label while the quiz runs.
    #[must_use]
    pub fn remaining_label(&self, now: DateTime<Utc>) -> Option<String> {
        self.session.remaining(now).map(format_remaining)
    }

    #[must_use]
    pub fn results(&self) -> Option<ResultsVm> {
        self.session.report().map(ResultsVm::from)
    }

    /// Apply the time limit; returns true if the quiz just timed out.
    pub fn refresh(&mut self, quiz_loop: &QuizLoopService) -> bool {
        let timed_out = quiz_loop.refresh(&mut self.session);
        if timed_out {
            self.show_current();
        }
        timed_out
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if no quiz is running.
    pub fn previous(&mut self, quiz_loop: &QuizLoopService) -> Result<QuizStep, ViewError> {
        let step = quiz_loop
            .previous(&mut self.session)
            .map_err(|_| ViewError::Unknown)?;
        self.show_current();
        Ok(step)
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if no quiz is running.
    pub fn next(&mut self, quiz_loop: &QuizLoopService) -> Result<QuizStep, ViewError> {
        let selection = self.selection.take();
        let step = quiz_loop
            .next(&mut self.session, selection.as_deref())
            .map_err(|_| ViewError::Unknown)?;
        self.show_current();
        Ok(step)
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` unless the quiz has finished.
    pub fn restart(&mut self, quiz_loop: &QuizLoopService) -> Result<(), ViewError> {
        quiz_loop
            .restart(&mut self.session)
            .map_err(|_| ViewError::Unknown)?;
        self.show_current();
        Ok(())
    }

    fn show_current(&mut self) {
        self.shown = self.session.present_current();
        self.selection = self.shown.as_ref().and_then(|q| q.selected.clone());
    }
}

/// Start a quiz from the exam form.
///
/// # Errors
///
/// Returns `ViewError::EmptyBank` when there are no questions,
/// `ViewError::IncompleteForm` when name or grade is missing,
/// `ViewError::InvalidForm` for out-of-range numbers, and
/// `ViewError::Unknown` for other failures.
pub async fn start_quiz(
    quiz_loop: &QuizLoopService,
    draft: QuizConfigDraft,
) -> Result<QuizVm, ViewError> {
    let mut session = QuizSession::new();
    match quiz_loop.start(&mut session, draft).await {
        Ok(()) => Ok(QuizVm::new(session)),
        Err(QuizError::EmptyBank) => Err(ViewError::EmptyBank),
        Err(QuizError::Config(err)) => Err(ViewError::from(err)),
        Err(_) => Err(ViewError::Unknown),
    }
}
