//! Symptom interview: a fixed question catalog walked one answer at a time.
//!
//! The walk is linear. There is no skip logic and no branching, so the
//! whole state is the catalog plus the list of answers recorded so far.

mod catalog;
mod walker;

pub use catalog::{Catalog, Question, QuestionKind};
pub use walker::{AnswerOutcome, Interview, InterviewState, RecordedAnswer};
