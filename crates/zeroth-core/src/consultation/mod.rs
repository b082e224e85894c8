//! Symptom consultation: free-text questions and interview submission.

mod service;

pub use service::{ConsultationError, ConsultationService};

use crate::pet::PetId;

/// Body of `POST /questions/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    pub pet_id: PetId,
    pub content: String,
}
