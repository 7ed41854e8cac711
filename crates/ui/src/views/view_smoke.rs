use super::test_harness::{ViewKind, sample_draft, setup_quiz_harness, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_warns_on_empty_bank() {
    let mut harness = setup_view_harness(ViewKind::Exam, &[]).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("The question bank is empty. Please contact an author."),
        "missing empty bank warning in {html}"
    );
    assert!(!html.contains("Start exam"), "unexpected start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_config_form() {
    let drafts = [
        sample_draft("Capital of France?", "Geography"),
        sample_draft("Capital of Italy?", "Geography"),
    ];
    let mut harness = setup_view_harness(ViewKind::Exam, &drafts).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("2 questions available."), "missing bank size in {html}");
    assert!(html.contains("Student name"), "missing name field in {html}");
    assert!(html.contains("Shuffle options"), "missing shuffle toggle in {html}");
    assert!(html.contains("Start exam"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn author_view_smoke_lists_bank() {
    let drafts = [sample_draft("Capital of France?", "Geography")];
    let mut harness = setup_view_harness(ViewKind::Author, &drafts).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Add question"), "missing form in {html}");
    assert!(html.contains("Questions in the bank: 1"), "missing count in {html}");
    assert!(html.contains("Categories: Geography"), "missing categories in {html}");
    assert!(
        html.contains("1. Capital of France? (Geography)"),
        "missing question title in {html}"
    );
    assert_eq!(harness.question_bank.len().await, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn author_view_smoke_renders_empty_bank() {
    let mut harness = setup_view_harness(ViewKind::Author, &[]).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No questions yet."), "missing empty state in {html}");
    assert!(html.contains("Option D"), "missing option inputs in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_panel_smoke_renders_current_question() {
    let drafts = [
        sample_draft("Capital of France?", "Geography"),
        sample_draft("Capital of Italy?", "Geography"),
    ];
    let mut harness = setup_quiz_harness(&drafts, &[]).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("Time remaining: 05:00"), "missing timer in {html}");
    assert!(html.contains("Capital of France?"), "missing question text in {html}");
    assert!(html.contains("Category: Geography"), "missing category in {html}");
    assert!(html.contains("A. Paris"), "missing first option in {html}");
    assert!(html.contains("D. Lisbon"), "missing last option in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
    assert!(!html.contains("Finish exam"), "unexpected finish button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_panel_smoke_offers_finish_on_last_question() {
    let drafts = [
        sample_draft("Capital of France?", "Geography"),
        sample_draft("Capital of Italy?", "Geography"),
    ];
    let mut harness = setup_quiz_harness(&drafts, &[Some("Paris")]).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "missing progress in {html}");
    assert!(html.contains("Capital of Italy?"), "missing question text in {html}");
    assert!(html.contains("Finish exam"), "missing finish button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_panel_smoke_renders_score_and_review() {
    let drafts = [
        sample_draft("Capital of France?", "Geography"),
        sample_draft("Capital of Italy?", "Geography"),
    ];
    let mut harness = setup_quiz_harness(&drafts, &[Some("Paris"), None]).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Results"), "missing heading in {html}");
    assert!(html.contains("Student: Ana"), "missing student in {html}");
    assert!(html.contains("Score: 1 / 2"), "missing score in {html}");
    assert!(html.contains("Percentage: 50.00%"), "missing percentage in {html}");
    assert!(html.contains("Question 1: Capital of France?"), "missing review title in {html}");
    assert!(html.contains("✅ Correct"), "missing correct verdict in {html}");
    assert!(html.contains("❌ Incorrect"), "missing incorrect verdict in {html}");
    assert!(html.contains("Your answer: not answered"), "missing unanswered row in {html}");
    assert!(html.contains("Take another exam"), "missing restart button in {html}");
    assert!(!html.contains("Time is up!"), "unexpected timeout notice in {html}");
}
