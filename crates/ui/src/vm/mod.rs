mod exam_vm;
mod question_vm;
mod time_fmt;

pub use exam_vm::{QuizVm, ResultsVm, ReviewRowVm, start_quiz};
pub use question_vm::{BankQuestionVm, map_bank_questions};
pub use time_fmt::format_remaining;
