mod author;
mod exam;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use author::AuthorView;
pub use exam::ExamView;
pub use state::{ViewError, ViewState, view_state_from_resource};
