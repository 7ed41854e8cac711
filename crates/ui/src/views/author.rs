use dioxus::prelude::*;
use quiz_core::model::{OptionLabel, QuestionDraft};
use services::BankError;
use tracing::warn;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{BankQuestionVm, map_bank_questions};

#[derive(Clone, Debug, PartialEq)]
struct BankListing {
    questions: Vec<BankQuestionVm>,
    categories: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(ViewError),
}

impl SaveState {
    fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle | Self::Saving => None,
            Self::Saved => Some("Question added to the bank."),
            Self::Error(err) => Some(err.message()),
        }
    }
}

#[component]
pub fn AuthorView() -> Element {
    let ctx = use_context::<AppContext>();
    let bank = ctx.question_bank();

    let mut text = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut options = use_signal(|| <[String; 4]>::default());
    let mut correct = use_signal(|| OptionLabel::A);
    let mut save_state = use_signal(|| SaveState::Idle);

    let bank_for_resource = bank.clone();
    let resource = use_resource(move || {
        let bank = bank_for_resource.clone();
        async move {
            Ok::<_, ViewError>(BankListing {
                questions: map_bank_questions(&bank.questions().await),
                categories: bank.categories().await,
            })
        }
    });

    let on_save = move |_: MouseEvent| {
        let bank = bank.clone();
        let draft = QuestionDraft {
            text: text(),
            category: category(),
            options: options(),
            correct: correct(),
        };
        spawn(async move {
            save_state.set(SaveState::Saving);
            match bank.append(draft).await {
                Ok(_) => {
                    text.set(String::new());
                    category.set(String::new());
                    options.set(<[String; 4]>::default());
                    correct.set(OptionLabel::A);
                    save_state.set(SaveState::Saved);
                    let mut resource = resource;
                    resource.restart();
                }
                Err(BankError::Question(_)) => {
                    save_state.set(SaveState::Error(ViewError::IncompleteForm));
                }
                Err(err) => {
                    warn!(error = %err, "failed to save question");
                    save_state.set(SaveState::Error(ViewError::Unknown));
                }
            }
        });
    };

    let state = view_state_from_resource(&resource);
    let is_saving = save_state() == SaveState::Saving;
    let feedback_class = if matches!(save_state(), SaveState::Error(_)) {
        "error"
    } else {
        "success"
    };

    rsx! {
        div { class: "page author-page",
            header { class: "view-header",
                h2 { class: "view-title", "Question bank" }
                p { class: "view-subtitle", "Add multiple-choice questions with four options." }
            }
            div { class: "view-divider" }
            div { class: "author-form",
                label { class: "field",
                    span { "Question" }
                    textarea {
                        value: "{text}",
                        oninput: move |evt| text.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Category" }
                    input {
                        r#type: "text",
                        value: "{category}",
                        oninput: move |evt| category.set(evt.value()),
                    }
                }
                for label in OptionLabel::ALL {
                    div { class: "field option-field", key: "{label}",
                        input {
                            r#type: "radio",
                            name: "correct",
                            title: "Mark as correct",
                            checked: correct() == label,
                            onchange: move |_| correct.set(label),
                        }
                        span { "Option {label}" }
                        input {
                            r#type: "text",
                            value: options.read()[label.index()].clone(),
                            oninput: move |evt| options.write()[label.index()] = evt.value(),
                        }
                    }
                }
                p { class: "hint", "Correct answer: option {correct}" }
                if let Some(message) = save_state().message() {
                    p { class: "{feedback_class}", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: is_saving,
                    onclick: on_save,
                    "Add question"
                }
            }
            div { class: "view-divider" }
            section { class: "bank-list",
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                    },
                    ViewState::Ready(listing) if listing.questions.is_empty() => rsx! {
                        p { "No questions yet." }
                    },
                    ViewState::Ready(listing) => {
                        let categories = listing.categories.join(", ");
                        rsx! {
                            h3 { "Questions in the bank: {listing.questions.len()}" }
                            p { class: "categories", "Categories: {categories}" }
                            for item in listing.questions.iter() {
                                div { class: "bank-question", key: "{item.title}",
                                    p { class: "bank-question-title", "{item.title}" }
                                    ul {
                                        for (label, option) in item.options.iter() {
                                            li {
                                                class: if *label == item.correct_label { "correct" },
                                                "{label}. {option}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
