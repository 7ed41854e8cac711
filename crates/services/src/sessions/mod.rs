mod plan;
mod present;
mod progress;
mod state;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::QuizError;
pub use plan::QuizBuilder;
pub use present::{PresentedOption, PresentedQuestion};
pub use progress::QuizProgress;
pub use state::{QuizPhase, QuizSession, QuizStep};
pub use workflow::QuizLoopService;
