use dioxus::prelude::*;
use quiz_core::model::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    EmptyBank,
    IncompleteForm,
    InvalidForm,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::EmptyBank => "The question bank is empty. Please contact an author.",
            Self::IncompleteForm => "Please complete all fields.",
            Self::InvalidForm => "Please check the number of questions and the time limit.",
        }
    }
}

impl From<ConfigError> for ViewError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::EmptyStudentName | ConfigError::EmptyStudentGrade => Self::IncompleteForm,
            ConfigError::InvalidQuestionCount { .. } | ConfigError::InvalidTimeLimit => {
                Self::InvalidForm
            }
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_form_messages() {
        assert_eq!(
            ViewError::from(ConfigError::EmptyStudentGrade),
            ViewError::IncompleteForm
        );
        assert_eq!(
            ViewError::from(ConfigError::InvalidQuestionCount { requested: 9, max: 3 }),
            ViewError::InvalidForm
        );
        assert_eq!(ViewError::IncompleteForm.message(), "Please complete all fields.");
    }
}
