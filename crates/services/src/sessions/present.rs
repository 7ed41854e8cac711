use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{OptionLabel, Question};

/// One answer option as displayed to the student.
///
/// `label` is the display position, which differs from the stored label
/// once options are shuffled. Answers are always submitted by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedOption {
    pub label: OptionLabel,
    pub text: String,
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    /// 1-based position in the quiz.
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub category: String,
    pub options: Vec<PresentedOption>,
    /// Option text previously recorded for this question, if any.
    pub selected: Option<String>,
    pub is_first: bool,
    pub is_last: bool,
}

/// Options of `question` in canonical A–D order, or shuffled and relabelled
/// by display position.
pub(crate) fn present_options<R: Rng + ?Sized>(
    question: &Question,
    shuffle: bool,
    rng: &mut R,
) -> Vec<PresentedOption> {
    let mut texts: Vec<&str> = question.options().iter().map(|(_, text)| text).collect();
    if shuffle {
        texts.shuffle(rng);
    }
    texts
        .into_iter()
        .zip(OptionLabel::ALL)
        .map(|(text, label)| PresentedOption {
            label,
            text: text.to_string(),
        })
        .collect()
}
