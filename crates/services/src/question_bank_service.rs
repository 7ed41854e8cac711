use std::collections::HashSet;
use std::sync::Arc;

use quiz_core::model::{Question, QuestionDraft};
use storage::QuestionRepository;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::BankError;

/// Owns the in-memory question bank and keeps it in sync with storage.
pub struct QuestionBankService {
    repo: Arc<dyn QuestionRepository>,
    questions: Mutex<Vec<Question>>,
}

impl QuestionBankService {
    /// Create a service with an empty in-memory bank. Call `load` to read storage.
    #[must_use]
    pub fn new(repo: Arc<dyn QuestionRepository>) -> Self {
        Self {
            repo,
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Create a service and load the bank from storage.
    pub async fn open(repo: Arc<dyn QuestionRepository>) -> Self {
        let service = Self::new(repo);
        service.load().await;
        service
    }

    /// Replace the in-memory bank with the stored one and return its size.
    ///
    /// Storage failures are logged and leave an empty bank.
    pub async fn load(&self) -> usize {
        let loaded = match self.repo.load_questions().await {
            Ok(questions) => questions,
            Err(err) => {
                warn!(error = %err, "failed to load question bank, starting empty");
                Vec::new()
            }
        };
        let count = loaded.len();
        *self.questions.lock().await = loaded;
        count
    }

    /// Snapshot of the bank in stored order.
    pub async fn questions(&self) -> Vec<Question> {
        self.questions.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.questions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.questions.lock().await.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub async fn categories(&self) -> Vec<String> {
        let guard = self.questions.lock().await;
        let mut seen = HashSet::new();
        guard
            .iter()
            .filter(|q| seen.insert(q.category()))
            .map(|q| q.category().to_string())
            .collect()
    }

    /// Validate `draft`, append it to the bank and persist the whole bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Question` if any field is empty (nothing is saved),
    /// or `BankError::Storage` if the bank cannot be written (the in-memory
    /// bank is left unchanged).
    pub async fn append(&self, draft: QuestionDraft) -> Result<Question, BankError> {
        let question = draft.validate()?;

        let mut guard = self.questions.lock().await;
        let mut next = guard.clone();
        next.push(question.clone());
        self.repo.save_questions(&next).await?;
        *guard = next;

        info!(
            category = question.category(),
            bank_size = guard.len(),
            "question added to bank"
        );
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{OptionLabel, QuestionError, QuestionField};
    use storage::{InMemoryRepository, StorageError};

    fn draft(text: &str, category: &str) -> QuestionDraft {
        QuestionDraft {
            text: text.into(),
            category: category.into(),
            options: ["a".into(), "b".into(), "c".into(), "d".into()],
            correct: OptionLabel::A,
        }
    }

    struct FailingRepo;

    #[async_trait]
    impl QuestionRepository for FailingRepo {
        async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }

        async fn save_questions(&self, _questions: &[Question]) -> Result<(), StorageError> {
            Err(StorageError::Connection("down".into()))
        }
    }

    #[tokio::test]
    async fn append_persists_immediately() {
        let repo = InMemoryRepository::new();
        let service = QuestionBankService::open(Arc::new(repo.clone())).await;

        service.append(draft("Q1", "Math")).await.unwrap();
        service.append(draft("Q2", "Art")).await.unwrap();

        let stored = repo.load_questions().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].text(), "Q2");
        assert_eq!(service.len().await, 2);
    }

    #[tokio::test]
    async fn incomplete_draft_is_not_saved() {
        let repo = InMemoryRepository::new();
        let service = QuestionBankService::open(Arc::new(repo.clone())).await;

        let mut incomplete = draft("Q1", "Math");
        incomplete.options[3] = String::new();
        let err = service.append(incomplete).await.unwrap_err();

        assert!(matches!(
            err,
            BankError::Question(QuestionError::EmptyField {
                field: QuestionField::Option(OptionLabel::D)
            })
        ));
        assert!(service.is_empty().await);
        assert!(repo.load_questions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failures_are_contained() {
        let service = QuestionBankService::open(Arc::new(FailingRepo)).await;
        assert!(service.is_empty().await);

        let err = service.append(draft("Q1", "Math")).await.unwrap_err();
        assert!(matches!(err, BankError::Storage(_)));
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn categories_are_distinct_in_first_seen_order() {
        let service = QuestionBankService::open(Arc::new(InMemoryRepository::new())).await;
        for (text, category) in [("1", "Math"), ("2", "Art"), ("3", "Math"), ("4", "Music")] {
            service.append(draft(text, category)).await.unwrap();
        }
        assert_eq!(service.categories().await, vec!["Math", "Art", "Music"]);
    }

    #[tokio::test]
    async fn load_reads_existing_bank() {
        let existing = vec![draft("Q1", "Math").validate().unwrap()];
        let repo = InMemoryRepository::with_questions(existing.clone());
        let service = QuestionBankService::new(Arc::new(repo));
        assert!(service.is_empty().await);

        assert_eq!(service.load().await, 1);
        assert_eq!(service.questions().await, existing);
    }
}
