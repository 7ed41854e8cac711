use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{OptionLabel, QuestionDraft, QuizConfigDraft};
use quiz_core::time::fixed_now;
use services::{Clock, QuestionBankService, QuizLoopService};
use storage::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::exam::{QuestionPanel, ResultsPanel};
use crate::views::{AuthorView, ExamView};
use crate::vm::{QuizVm, start_quiz};

#[derive(Clone)]
struct TestApp {
    question_bank: Arc<QuestionBankService>,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn question_bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_bank)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Exam,
    Author,
    Question,
    Results,
}

/// Quiz handed to the panel views, taken once when the view mounts.
#[derive(Clone, Default)]
struct RunningQuiz(Rc<RefCell<Option<QuizVm>>>);

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz: RunningQuiz,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.quiz.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    let running = use_context::<RunningQuiz>();
    let quiz = use_signal(move || running.0.borrow_mut().take());
    let results = quiz.read().as_ref().and_then(QuizVm::results);
    match (view, results) {
        (ViewKind::Exam, _) => rsx! { ExamView {} },
        (ViewKind::Author, _) => rsx! { AuthorView {} },
        (ViewKind::Question, _) => rsx! { QuestionPanel { quiz } },
        (ViewKind::Results, Some(results)) => rsx! {
            ResultsPanel { results, on_restart: move |_| {} }
        },
        (ViewKind::Results, None) => rsx! {},
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub question_bank: Arc<QuestionBankService>,
}

impl ViewHarness {
    pub async fn drive_async(&mut self) {
        self.dom.rebuild_in_place();
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn sample_draft(text: &str, category: &str) -> QuestionDraft {
    QuestionDraft {
        text: text.to_string(),
        category: category.to_string(),
        options: [
            "Paris".to_string(),
            "Rome".to_string(),
            "Madrid".to_string(),
            "Lisbon".to_string(),
        ],
        correct: OptionLabel::A,
    }
}

pub fn exam_form(question_count: usize) -> QuizConfigDraft {
    QuizConfigDraft {
        student_name: "Ana".to_string(),
        student_grade: "7B".to_string(),
        question_count,
        time_limit_minutes: 5,
        shuffle_questions: false,
        shuffle_options: false,
    }
}

pub async fn setup_view_harness(view: ViewKind, questions: &[QuestionDraft]) -> ViewHarness {
    let app = build_test_app(questions).await;
    let question_bank = app.question_bank();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz: RunningQuiz::default(),
        },
    );
    ViewHarness { dom, question_bank }
}

/// Start a quiz over `questions`, pick `answers` in order, and mount the
/// question panel, or the results panel once every question is answered.
pub async fn setup_quiz_harness(questions: &[QuestionDraft], answers: &[Option<&str>]) -> ViewHarness {
    let app = build_test_app(questions).await;
    let question_bank = app.question_bank();
    let quiz_loop = app.quiz_loop();
    let mut vm = start_quiz(&quiz_loop, exam_form(questions.len()))
        .await
        .expect("start quiz");
    for answer in answers {
        if let Some(text) = answer {
            vm.select(&quiz_loop, (*text).to_string());
        }
        vm.next(&quiz_loop).expect("next question");
    }
    let view = if vm.results().is_some() {
        ViewKind::Results
    } else {
        ViewKind::Question
    };
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz: RunningQuiz(Rc::new(RefCell::new(Some(vm)))),
        },
    );
    ViewHarness { dom, question_bank }
}

async fn build_test_app(questions: &[QuestionDraft]) -> Arc<TestApp> {
    let storage = Storage::in_memory();
    let clock = Clock::fixed(fixed_now());
    let question_bank = Arc::new(QuestionBankService::open(Arc::clone(&storage.questions)).await);
    for draft in questions {
        question_bank
            .append(draft.clone())
            .await
            .expect("add question");
    }
    let quiz_loop = Arc::new(QuizLoopService::new(clock, Arc::clone(&question_bank)));

    Arc::new(TestApp {
        question_bank,
        quiz_loop,
    })
}
