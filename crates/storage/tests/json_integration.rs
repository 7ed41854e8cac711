use quiz_core::model::{OptionLabel, Question, QuestionDraft};
use storage::{JsonFileRepository, QuestionRepository, Storage};

fn build_question(id: u32, correct: OptionLabel) -> Question {
    QuestionDraft {
        text: format!("Question {id}"),
        category: if id % 2 == 0 { "Math" } else { "History" }.to_string(),
        options: [
            format!("{id}-a"),
            format!("{id}-b"),
            format!("{id}-c"),
            format!("{id}-d"),
        ],
        correct,
    }
    .validate()
    .unwrap()
}

#[tokio::test]
async fn json_roundtrip_preserves_order_and_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = JsonFileRepository::new(dir.path().join("questions.json"));

    let bank = vec![
        build_question(1, OptionLabel::A),
        build_question(2, OptionLabel::D),
        build_question(3, OptionLabel::B),
    ];
    repo.save_questions(&bank).await.expect("save");

    let loaded = repo.load_questions().await.expect("load");
    assert_eq!(loaded, bank);
}

#[tokio::test]
async fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = JsonFileRepository::new(dir.path().join("absent.json"));
    assert!(repo.load_questions().await.expect("load").is_empty());
}

#[tokio::test]
async fn corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("questions.json");
    std::fs::write(&path, "[{\"question\": ").expect("write");

    let repo = JsonFileRepository::new(&path);
    assert!(repo.load_questions().await.expect("load").is_empty());
}

#[tokio::test]
async fn save_is_a_full_rewrite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Storage::json_file(dir.path().join("nested").join("bank.json"));

    storage
        .questions
        .save_questions(&[build_question(1, OptionLabel::A), build_question(2, OptionLabel::B)])
        .await
        .expect("first save");
    storage
        .questions
        .save_questions(&[build_question(3, OptionLabel::C)])
        .await
        .expect("second save");

    let loaded = storage.questions.load_questions().await.expect("load");
    assert_eq!(loaded, vec![build_question(3, OptionLabel::C)]);
}

#[tokio::test]
async fn hand_written_file_is_readable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("questions.json");
    let raw = r#"[
    {
        "question": "Largest planet?",
        "category": "Science",
        "options": {
            "A": "Mars",
            "B": "Jupiter",
            "C": "Venus",
            "D": "Earth"
        },
        "correct": "B"
    }
]"#;
    std::fs::write(&path, raw).expect("write");

    let loaded = JsonFileRepository::new(&path)
        .load_questions()
        .await
        .expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].category(), "Science");
    assert_eq!(loaded[0].correct_text(), "Jupiter");
}

#[tokio::test]
async fn invalid_records_survive_a_load_and_append() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("questions.json");
    let raw = r#"[
    {
        "question": "Hand edited",
        "category": "",
        "options": {"A": "1", "B": "2", "C": "3", "D": "4"},
        "correct": "A"
    },
    {
        "question": "Largest planet?",
        "category": "Science",
        "options": {"A": "Mars", "B": "Jupiter", "C": "Venus", "D": "Earth"},
        "correct": "B"
    },
    {
        "question": "Five choices",
        "category": "Science",
        "options": {"A": "1", "B": "2", "C": "3", "D": "4", "E": "5"},
        "correct": "E"
    }
]"#;
    std::fs::write(&path, raw).expect("write");

    let repo = JsonFileRepository::new(&path);
    let mut bank = repo.load_questions().await.expect("load");
    assert_eq!(bank.len(), 1);
    bank.push(build_question(4, OptionLabel::C));
    repo.save_questions(&bank).await.expect("save");

    let written: Vec<serde_json::Value> =
        serde_json::from_slice(&std::fs::read(&path).expect("read")).expect("json");
    assert_eq!(written.len(), 4);
    assert_eq!(written[0]["question"], "Hand edited");
    assert_eq!(written[0]["category"], "");
    assert_eq!(written[1]["question"], "Largest planet?");
    assert_eq!(written[2]["options"]["E"], "5");
    assert_eq!(written[2]["correct"], "E");
    assert_eq!(written[3]["question"], "Question 4");

    let reloaded = JsonFileRepository::new(&path)
        .load_questions()
        .await
        .expect("reload");
    assert_eq!(reloaded, bank);
}
