use super::catalog::{Catalog, Question};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewState {
    /// Waiting for the answer to the question at this catalog index.
    Asking(usize),
    /// Every question has an answer.
    Complete,
}

/// Result of [`Interview::answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Input was not acceptable; nothing changed.
    Rejected,
    /// Recorded; now asking the question at this index.
    Advanced(usize),
    /// Recorded the last answer.
    Completed,
}

/// One recorded answer, with a snapshot of the prompt it answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAnswer {
    pub question_id: String,
    pub prompt: String,
    pub value: String,
}

/// A single walk through a [`Catalog`].
///
/// The cursor is the number of recorded answers, so `answers().len()` and the
/// `Asking` index can never disagree. Create one per consultation and drop it
/// after a successful submission.
#[derive(Debug, Clone)]
pub struct Interview {
    catalog: Arc<Catalog>,
    answers: Vec<RecordedAnswer>,
}

impl Interview {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let capacity = catalog.len();
        Self {
            catalog,
            answers: Vec::with_capacity(capacity),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> InterviewState {
        let cursor = self.cursor();
        if cursor < self.catalog.len() {
            InterviewState::Asking(cursor)
        } else {
            InterviewState::Complete
        }
    }

    /// Index of the next unanswered question.
    pub fn cursor(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.state() == InterviewState::Complete
    }

    /// The question currently being asked, `None` once complete.
    pub fn current_question(&self) -> Option<&Question> {
        self.catalog.get(self.cursor())
    }

    pub fn answers(&self) -> &[RecordedAnswer] {
        &self.answers
    }

    /// Records `value` for the current question and advances.
    ///
    /// Single-choice questions accept only an exact option label. Free-text
    /// questions accept any input that is non-blank after trimming and record
    /// the trimmed text. Anything else, or any call once complete, returns
    /// [`AnswerOutcome::Rejected`] without touching the state.
    pub fn answer(&mut self, value: &str) -> AnswerOutcome {
        let Some(question) = self.current_question() else {
            return AnswerOutcome::Rejected;
        };
        let Some(accepted) = question.accept(value) else {
            return AnswerOutcome::Rejected;
        };

        let record = RecordedAnswer {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            value: accepted,
        };
        self.answers.push(record);

        match self.state() {
            InterviewState::Asking(next) => AnswerOutcome::Advanced(next),
            InterviewState::Complete => AnswerOutcome::Completed,
        }
    }

    /// Removes the most recent answer. Returns false at the first question.
    pub fn back(&mut self) -> bool {
        self.answers.pop().is_some()
    }

    /// Answers as `"{prompt}: {value}"` lines in catalog order.
    ///
    /// Only available once the interview is complete.
    pub fn transcript(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        let lines: Vec<String> = self
            .answers
            .iter()
            .map(|answer| format!("{}: {}", answer.prompt, answer.value))
            .collect();
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                Question::single_choice("q1", "Q1", ["A", "B"]),
                Question::free_text("q2", "Q2"),
            ])
            .unwrap(),
        )
    }

    fn recorded(id: &str, prompt: &str, value: &str) -> RecordedAnswer {
        RecordedAnswer {
            question_id: id.into(),
            prompt: prompt.into(),
            value: value.into(),
        }
    }

    #[test]
    fn test_two_question_walk() {
        let mut interview = Interview::new(two_question_catalog());
        assert_eq!(interview.state(), InterviewState::Asking(0));

        assert_eq!(interview.answer("A"), AnswerOutcome::Advanced(1));
        assert_eq!(interview.state(), InterviewState::Asking(1));
        assert_eq!(interview.answers(), &[recorded("q1", "Q1", "A")]);

        assert_eq!(interview.answer("  "), AnswerOutcome::Rejected);
        assert_eq!(interview.state(), InterviewState::Asking(1));
        assert_eq!(interview.answers().len(), 1);

        assert_eq!(interview.answer("hello"), AnswerOutcome::Completed);
        assert_eq!(interview.state(), InterviewState::Complete);
        assert_eq!(
            interview.answers(),
            &[recorded("q1", "Q1", "A"), recorded("q2", "Q2", "hello")]
        );
        assert_eq!(interview.transcript().as_deref(), Some("Q1: A\nQ2: hello"));
    }

    #[test]
    fn test_empty_free_text_never_advances() {
        let mut interview = Interview::new(Arc::new(
            Catalog::new(vec![Question::free_text("only", "Describe")]).unwrap(),
        ));

        for input in ["", " ", "\t\n"] {
            assert_eq!(interview.answer(input), AnswerOutcome::Rejected);
            assert_eq!(interview.cursor(), 0);
            assert!(interview.answers().is_empty());
        }
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut interview = Interview::new(two_question_catalog());
        assert_eq!(interview.answer("C"), AnswerOutcome::Rejected);
        assert_eq!(interview.state(), InterviewState::Asking(0));
    }

    #[test]
    fn test_answer_then_back_restores_previous_state() {
        let catalog = Arc::new(Catalog::default());
        let inputs: Vec<String> = catalog
            .questions()
            .iter()
            .map(|q| q.options().first().cloned().unwrap_or_else(|| "text".into()))
            .collect();

        let mut interview = Interview::new(catalog.clone());
        for input in &inputs {
            let before_answers = interview.answers().to_vec();
            let before_state = interview.state();

            assert_ne!(interview.answer(input), AnswerOutcome::Rejected);
            assert!(interview.back());
            assert_eq!(interview.answers(), before_answers.as_slice());
            assert_eq!(interview.state(), before_state);

            interview.answer(input);
        }
        assert!(interview.is_complete());
    }

    #[test]
    fn test_back_from_complete_returns_to_last_question() {
        let mut interview = Interview::new(two_question_catalog());
        interview.answer("B");
        interview.answer("done");

        assert!(interview.back());
        assert_eq!(interview.state(), InterviewState::Asking(1));
        assert_eq!(interview.transcript(), None);
    }

    #[test]
    fn test_back_at_first_question_is_noop() {
        let mut interview = Interview::new(two_question_catalog());
        assert!(!interview.back());
        assert_eq!(interview.state(), InterviewState::Asking(0));
    }

    #[test]
    fn test_complete_reached_exactly_once() {
        let catalog = Arc::new(Catalog::default());
        let n = catalog.len();
        let mut interview = Interview::new(catalog.clone());
        let mut completions = 0;

        for (i, question) in catalog.questions().iter().enumerate() {
            let input = question.options().last().cloned().unwrap_or_else(|| "fine".into());
            let outcome = interview.answer(&input);
            if outcome == AnswerOutcome::Completed {
                completions += 1;
                assert_eq!(i + 1, n);
            } else {
                assert_eq!(outcome, AnswerOutcome::Advanced(i + 1));
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(interview.answer("extra"), AnswerOutcome::Rejected);
        assert_eq!(interview.answers().len(), n);
    }
}
