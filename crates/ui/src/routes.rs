use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AuthorView, ExamView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ExamView)] Exam {},
        #[route("/author", AuthorView)] Author {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Exam {}, "Take an exam" } }
                li { Link { to: Route::Author {}, "Question bank" } }
            }
        }
    }
}
