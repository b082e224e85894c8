use crate::error::{Result, ZerothError};
use std::collections::HashSet;

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// One of a fixed, ordered list of labels.
    SingleChoice { options: Vec<String> },
    /// Any non-blank text.
    FreeText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn single_choice(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: QuestionKind::SingleChoice {
                options: options.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn free_text(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: QuestionKind::FreeText,
        }
    }

    /// Option labels, empty for free-text questions.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::SingleChoice { options } => options,
            QuestionKind::FreeText => &[],
        }
    }

    /// The value to record for `input`, or `None` if it is not acceptable.
    pub(crate) fn accept(&self, input: &str) -> Option<String> {
        match &self.kind {
            QuestionKind::SingleChoice { options } => {
                options.iter().find(|label| label.as_str() == input).cloned()
            }
            QuestionKind::FreeText => {
                let trimmed = input.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

/// Validated, ordered list of interview questions.
///
/// Guarantees at least one question, unique ids, non-blank prompts, and at
/// least one distinct option for every single-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(ZerothError::config("interview catalog has no questions"));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if question.id.trim().is_empty() {
                return Err(ZerothError::config("interview question id is empty"));
            }
            if !seen.insert(question.id.as_str()) {
                return Err(ZerothError::config(format!(
                    "duplicate interview question id '{}'",
                    question.id
                )));
            }
            if question.prompt.trim().is_empty() {
                return Err(ZerothError::config(format!(
                    "interview question '{}' has an empty prompt",
                    question.id
                )));
            }
            if let QuestionKind::SingleChoice { options } = &question.kind {
                let distinct: HashSet<_> = options.iter().collect();
                if options.is_empty() || distinct.len() != options.len() {
                    return Err(ZerothError::config(format!(
                        "interview question '{}' needs distinct options",
                        question.id
                    )));
                }
            }
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Default for Catalog {
    /// Built-in symptom questionnaire.
    fn default() -> Self {
        Self {
            questions: vec![
                Question::single_choice(
                    "main_symptom",
                    "Main symptom",
                    [
                        "Vomiting",
                        "Diarrhea",
                        "Loss of appetite",
                        "Lethargy",
                        "Coughing or sneezing",
                        "Itching or skin trouble",
                        "Limping",
                        "Other",
                    ],
                ),
                Question::single_choice(
                    "onset",
                    "Since when",
                    ["Today", "2-3 days ago", "About a week ago", "More than a week ago"],
                ),
                Question::single_choice("appetite", "Appetite", ["Normal", "Reduced", "None"]),
                Question::single_choice(
                    "energy",
                    "Energy level",
                    ["Normal", "Somewhat low", "Very low"],
                ),
                Question::free_text("details", "Other details"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_passes_validation() {
        let default = Catalog::default();
        let validated = Catalog::new(default.questions().to_vec()).unwrap();
        assert_eq!(validated, default);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Question::free_text("q", "First"),
            Question::free_text("q", "Second"),
        ]);
        assert!(matches!(result, Err(ZerothError::Config(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_single_choice_without_options() {
        let empty: [&str; 0] = [];
        assert!(Catalog::new(vec![Question::single_choice("q", "Pick", empty)]).is_err());
        assert!(Catalog::new(vec![Question::single_choice("q", "Pick", ["A", "A"])]).is_err());
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(Catalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_accept_single_choice_is_exact() {
        let question = Question::single_choice("q", "Pick", ["A", "B"]);
        assert_eq!(question.accept("A"), Some("A".to_string()));
        assert_eq!(question.accept("a"), None);
        assert_eq!(question.accept(" A"), None);
    }

    #[test]
    fn test_accept_free_text_trims() {
        let question = Question::free_text("q", "Tell me");
        assert_eq!(question.accept("  hello \n"), Some("hello".to_string()));
        assert_eq!(question.accept(" \t "), None);
    }
}
