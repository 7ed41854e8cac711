use dioxus::prelude::*;
use quiz_core::model::QuizConfigDraft;
use services::QuizPhase;
use tracing::warn;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizVm, ResultsVm, start_quiz};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StartState {
    Idle,
    Starting,
    Error(ViewError),
}

#[component]
pub fn ExamView() -> Element {
    let ctx = use_context::<AppContext>();
    let bank = ctx.question_bank();
    let quiz_loop = ctx.quiz_loop();
    let quiz = use_signal(|| None::<QuizVm>);

    let bank_size = use_resource(move || {
        let bank = bank.clone();
        async move { Ok::<_, ViewError>(bank.len().await) }
    });

    let phase = quiz
        .read()
        .as_ref()
        .map_or(QuizPhase::Configuring, QuizVm::phase);
    let results = quiz.read().as_ref().and_then(QuizVm::results);
    let state = view_state_from_resource(&bank_size);

    rsx! {
        div { class: "page exam-page",
            header { class: "view-header",
                h2 { class: "view-title", "Exam" }
                p { class: "view-subtitle", "Answer each question before the time runs out." }
            }
            div { class: "view-divider" }
            match (phase, state) {
                (QuizPhase::InProgress, _) => rsx! {
                    QuestionPanel { quiz }
                },
                (QuizPhase::Finished, _) => match results {
                    Some(results) => rsx! {
                        ResultsPanel {
                            results,
                            on_restart: move |_| {
                                let mut quiz = quiz;
                                if let Some(vm) = quiz.write().as_mut() {
                                    if let Err(err) = vm.restart(&quiz_loop) {
                                        warn!(?err, "failed to restart quiz");
                                    }
                                }
                                quiz.set(None);
                                let mut bank_size = bank_size;
                                bank_size.restart();
                            },
                        }
                    },
                    None => rsx! {
                        p { "{ViewError::Unknown.message()}" }
                    },
                },
                (QuizPhase::Configuring, ViewState::Idle) => rsx! {
                    p { "Idle" }
                },
                (QuizPhase::Configuring, ViewState::Loading) => rsx! {
                    p { "Loading..." }
                },
                (QuizPhase::Configuring, ViewState::Error(err)) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut bank_size = bank_size;
                            bank_size.restart();
                        },
                        "Retry"
                    }
                },
                (QuizPhase::Configuring, ViewState::Ready(0)) => rsx! {
                    p { class: "warning", "{ViewError::EmptyBank.message()}" }
                },
                (QuizPhase::Configuring, ViewState::Ready(size)) => rsx! {
                    ConfigPanel { quiz, bank_size: size }
                },
            }
        }
    }
}

#[component]
fn ConfigPanel(quiz: Signal<Option<QuizVm>>, bank_size: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let defaults = QuizConfigDraft::defaults_for(bank_size);
    let default_count = defaults.question_count;
    let default_minutes = defaults.time_limit_minutes;
    let default_shuffle_questions = defaults.shuffle_questions;
    let default_shuffle_options = defaults.shuffle_options;

    let mut student_name = use_signal(String::new);
    let mut student_grade = use_signal(String::new);
    let mut question_count = use_signal(move || default_count.to_string());
    let mut time_limit = use_signal(move || default_minutes.to_string());
    let mut shuffle_questions = use_signal(move || default_shuffle_questions);
    let mut shuffle_options = use_signal(move || default_shuffle_options);
    let mut start_state = use_signal(|| StartState::Idle);

    let on_start = move |_: MouseEvent| {
        let quiz_loop = quiz_loop.clone();
        let mut quiz = quiz;
        let count = question_count().trim().parse::<usize>();
        let minutes = time_limit().trim().parse::<u32>();
        let (Ok(count), Ok(minutes)) = (count, minutes) else {
            start_state.set(StartState::Error(ViewError::InvalidForm));
            return;
        };
        let draft = QuizConfigDraft {
            student_name: student_name(),
            student_grade: student_grade(),
            question_count: count,
            time_limit_minutes: minutes,
            shuffle_questions: shuffle_questions(),
            shuffle_options: shuffle_options(),
        };
        spawn(async move {
            start_state.set(StartState::Starting);
            match start_quiz(&quiz_loop, draft).await {
                Ok(vm) => {
                    start_state.set(StartState::Idle);
                    quiz.set(Some(vm));
                }
                Err(err) => start_state.set(StartState::Error(err)),
            }
        });
    };

    let is_starting = start_state() == StartState::Starting;
    rsx! {
        div { class: "exam-config",
            p { "{bank_size} questions available." }
            label { class: "field",
                span { "Student name" }
                input {
                    r#type: "text",
                    value: "{student_name}",
                    oninput: move |evt| student_name.set(evt.value()),
                }
            }
            label { class: "field",
                span { "Grade" }
                input {
                    r#type: "text",
                    value: "{student_grade}",
                    oninput: move |evt| student_grade.set(evt.value()),
                }
            }
            label { class: "field",
                span { "Number of questions" }
                input {
                    r#type: "number",
                    min: "1",
                    max: "{bank_size}",
                    value: "{question_count}",
                    oninput: move |evt| question_count.set(evt.value()),
                }
            }
            label { class: "field",
                span { "Time limit (minutes)" }
                input {
                    r#type: "number",
                    min: "1",
                    value: "{time_limit}",
                    oninput: move |evt| time_limit.set(evt.value()),
                }
            }
            label { class: "field checkbox",
                input {
                    r#type: "checkbox",
                    checked: shuffle_questions(),
                    onchange: move |evt| shuffle_questions.set(evt.checked()),
                }
                span { "Shuffle questions" }
            }
            label { class: "field checkbox",
                input {
                    r#type: "checkbox",
                    checked: shuffle_options(),
                    onchange: move |evt| shuffle_options.set(evt.checked()),
                }
                span { "Shuffle options" }
            }
            if let StartState::Error(err) = start_state() {
                p { class: "error", "{err.message()}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: is_starting,
                onclick: on_start,
                "Start exam"
            }
        }
    }
}

#[component]
pub(super) fn QuestionPanel(quiz: Signal<Option<QuizVm>>) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let now = quiz_loop.clock().now();

    let (question, selection, remaining) = {
        let guard = quiz.read();
        let Some(vm) = guard.as_ref() else {
            return rsx! {};
        };
        (
            vm.question().cloned(),
            vm.selection().map(str::to_owned),
            vm.remaining_label(now).unwrap_or_default(),
        )
    };
    let Some(question) = question else {
        return rsx! {};
    };

    let quiz_loop_for_select = quiz_loop.clone();
    let quiz_loop_for_previous = quiz_loop.clone();
    let on_previous = move |_: MouseEvent| {
        let mut quiz = quiz;
        if let Some(vm) = quiz.write().as_mut() {
            if let Err(err) = vm.previous(&quiz_loop_for_previous) {
                warn!(?err, "failed to go back");
            }
        }
    };
    let on_next = move |_: MouseEvent| {
        let mut quiz = quiz;
        if let Some(vm) = quiz.write().as_mut() {
            if let Err(err) = vm.next(&quiz_loop) {
                warn!(?err, "failed to advance");
            }
        }
    };
    let next_label = if question.is_last { "Finish exam" } else { "Next" };

    rsx! {
        div { class: "exam-question",
            div { class: "exam-status",
                span { "Question {question.number} of {question.total}" }
                span { class: "timer", "Time remaining: {remaining}" }
            }
            h3 { "{question.text}" }
            p { class: "category", "Category: {question.category}" }
            div { class: "options",
                for option in question.options.iter() {
                    label { class: "option", key: "{option.label}",
                        input {
                            r#type: "radio",
                            name: "answer",
                            checked: selection.as_deref() == Some(option.text.as_str()),
                            onchange: {
                                let text = option.text.clone();
                                let quiz_loop = quiz_loop_for_select.clone();
                                move |_| {
                                    let mut quiz = quiz;
                                    if let Some(vm) = quiz.write().as_mut() {
                                        vm.select(&quiz_loop, text.clone());
                                    }
                                }
                            },
                        }
                        span { "{option.label}. {option.text}" }
                    }
                }
            }
            div { class: "exam-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: question.is_first,
                    onclick: on_previous,
                    "Previous"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: on_next,
                    "{next_label}"
                }
            }
        }
    }
}

#[component]
pub(super) fn ResultsPanel(results: ResultsVm, on_restart: EventHandler<()>) -> Element {
    rsx! {
        div { class: "exam-results",
            h3 { "Results" }
            if results.timed_out {
                p { class: "warning", "Time is up! The exam was submitted automatically." }
            }
            p { "Student: {results.student_name}" }
            p { "Grade: {results.student_grade}" }
            p { class: "score", "Score: {results.score_label}" }
            p { class: "score", "Percentage: {results.percentage_label}" }
            h4 { "Review" }
            ul { class: "review",
                for row in results.rows.iter() {
                    li { key: "{row.title}",
                        class: if row.is_correct { "review-row correct" } else { "review-row incorrect" },
                        p { class: "review-title", "{row.title}" }
                        p { "Your answer: {row.answer}" }
                        p { "Correct answer: {row.correct_answer}" }
                        p { class: "verdict", "{row.verdict()}" }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Take another exam"
            }
        }
    }
}
