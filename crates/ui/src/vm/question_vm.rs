use quiz_core::model::{OptionLabel, Question};

/// UI-ready question for the author's bank listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankQuestionVm {
    pub title: String,
    pub options: Vec<(OptionLabel, String)>,
    pub correct_label: OptionLabel,
}

impl BankQuestionVm {
    #[must_use]
    pub fn new(number: usize, question: &Question) -> Self {
        Self {
            title: format!("{number}. {} ({})", question.text(), question.category()),
            options: question
                .options()
                .iter()
                .map(|(label, text)| (label, text.to_string()))
                .collect(),
            correct_label: question.correct(),
        }
    }
}

#[must_use]
pub fn map_bank_questions(questions: &[Question]) -> Vec<BankQuestionVm> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| BankQuestionVm::new(index + 1, question))
        .collect()
}
