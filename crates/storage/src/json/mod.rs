use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::Question;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

const INDENT: &[u8] = b"    ";

/// A record that failed to load, kept verbatim with its position in the file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SkippedRecord {
    pub index: usize,
    pub raw: Value,
}

#[derive(Debug, Default, PartialEq)]
pub(crate) struct DecodedBank {
    pub questions: Vec<Question>,
    pub skipped: Vec<SkippedRecord>,
}

/// Question bank stored as a human-editable JSON array in a single file.
///
/// Records that do not validate are left out of the loaded bank but written
/// back unchanged, at their original position, on the next save.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    skipped: Arc<Mutex<Vec<SkippedRecord>>>,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            skipped: Arc::default(),
        }
    }
}

/// Decode a bank file, keeping every record that validates.
///
/// A document that is not a JSON array decodes to an empty bank.
pub(crate) fn decode_bank(bytes: &[u8]) -> DecodedBank {
    let values: Vec<Value> = match serde_json::from_slice(bytes) {
        Ok(values) => values,
        Err(err) => {
            warn!(error = %err, "question bank is not a JSON array, starting empty");
            return DecodedBank::default();
        }
    };

    let mut decoded = DecodedBank::default();
    for (index, value) in values.into_iter().enumerate() {
        let question = serde_json::from_value::<QuestionRecord>(value.clone())
            .map_err(|e| StorageError::Serialization(e.to_string()))
            .and_then(QuestionRecord::into_question);
        match question {
            Ok(question) => decoded.questions.push(question),
            Err(err) => {
                warn!(index, error = %err, "invalid question record left untouched");
                decoded.skipped.push(SkippedRecord { index, raw: value });
            }
        }
    }
    decoded
}

/// Encode the bank as a 4-space indented JSON array.
///
/// `skipped` records are reinserted at their original indices, so a bank
/// that was loaded and then appended to keeps its hand-edited entries.
pub(crate) fn encode_bank(
    questions: &[Question],
    skipped: &[SkippedRecord],
) -> Result<Vec<u8>, StorageError> {
    let mut records = questions
        .iter()
        .map(|q| serde_json::to_value(QuestionRecord::from_question(q)))
        .collect::<Result<Vec<Value>, _>>()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    // Ascending order restores each position exactly.
    for record in skipped {
        let at = record.index.min(records.len());
        records.insert(at, record.raw.clone());
    }

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records
        .serialize(&mut ser)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(buf)
}

#[async_trait]
impl QuestionRepository for JsonFileRepository {
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "question bank file not found, starting empty");
                Vec::new()
            }
            Err(err) => return Err(StorageError::Io(err)),
        };
        let decoded = if bytes.is_empty() {
            DecodedBank::default()
        } else {
            decode_bank(&bytes)
        };
        debug!(
            path = %self.path.display(),
            count = decoded.questions.len(),
            skipped = decoded.skipped.len(),
            "loaded question bank"
        );
        let mut skipped = self
            .skipped
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *skipped = decoded.skipped;
        Ok(decoded.questions)
    }

    async fn save_questions(&self, questions: &[Question]) -> Result<(), StorageError> {
        let bytes = {
            let skipped = self
                .skipped
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            encode_bank(questions, &skipped)?
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), count = questions.len(), "saved question bank");
        Ok(())
    }
}
