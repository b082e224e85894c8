use super::QuestionRequest;
use crate::action::ActionGate;
use crate::api::{ApiError, QuestionApi};
use crate::interview::Interview;
use crate::pet::PetId;
use crate::session::SessionManager;
use std::sync::Arc;
use thiserror::Error;

/// Why a consultation was not answered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsultationError {
    #[error("Please choose a pet")]
    NoPetSelected,

    #[error("Please describe the symptoms")]
    EmptyContent,

    #[error("The interview is not finished yet")]
    Incomplete,

    #[error("Please log in first")]
    NotSignedIn,

    /// Another consultation from the same view is still in flight.
    #[error("A consultation is already in progress")]
    Busy,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ConsultationError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message("Consultation"),
            other => other.to_string(),
        }
    }
}

/// Sends symptom descriptions to the AI question endpoint.
///
/// Each service instance stands for one consultation view: it refuses a
/// second submission while the first is still in flight.
pub struct ConsultationService {
    api: Arc<dyn QuestionApi>,
    session: Arc<SessionManager>,
    gate: ActionGate,
}

impl ConsultationService {
    pub fn new(api: Arc<dyn QuestionApi>, session: Arc<SessionManager>) -> Self {
        Self {
            api,
            session,
            gate: ActionGate::new(),
        }
    }

    /// Gate shared with the view, so it can render the action as disabled.
    pub fn gate(&self) -> &ActionGate {
        &self.gate
    }

    /// Free-text consultation.
    pub async fn ask(
        &self,
        pet_id: Option<PetId>,
        content: &str,
    ) -> Result<String, ConsultationError> {
        let pet_id = pet_id.ok_or(ConsultationError::NoPetSelected)?;
        if content.trim().is_empty() {
            return Err(ConsultationError::EmptyContent);
        }
        self.send(QuestionRequest {
            pet_id,
            content: content.to_string(),
        })
        .await
    }

    /// Submits a completed interview for `pet_id`.
    ///
    /// Rejected without a pet regardless of the interview state, and rejected
    /// while the interview is incomplete. The interview is never modified; on
    /// success the caller should discard it.
    pub async fn submit(
        &self,
        interview: &Interview,
        pet_id: Option<PetId>,
    ) -> Result<String, ConsultationError> {
        let pet_id = pet_id.ok_or(ConsultationError::NoPetSelected)?;
        let content = interview.transcript().ok_or(ConsultationError::Incomplete)?;
        self.send(QuestionRequest { pet_id, content }).await
    }

    async fn send(&self, request: QuestionRequest) -> Result<String, ConsultationError> {
        let session = self.session.current().ok_or(ConsultationError::NotSignedIn)?;
        let _in_flight = self.gate.try_begin().ok_or(ConsultationError::Busy)?;

        tracing::info!(
            "[Consultation] Asking about pet {} ({} chars)",
            request.pet_id,
            request.content.chars().count()
        );

        match self.api.ask(&session.token, &request).await {
            Ok(answer) => Ok(answer),
            Err(err) => {
                tracing::warn!("[Consultation] Failed: {}", err);
                self.session.handle_unauthorized(&err, &session.token);
                Err(err.into())
            }
        }
    }
}
