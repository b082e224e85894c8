//! Seams between the domain layer and the remote API.
//!
//! Every remote call returns an [`ApiResult`], and every authenticated call
//! takes the caller's [`BearerToken`] explicitly. No implementation keeps a
//! credential of its own.

mod credential;
mod error;

pub use credential::BearerToken;
pub use error::{ApiError, ApiErrorKind, ApiResult};

use crate::account::Registration;
use crate::consultation::QuestionRequest;
use crate::pet::{Disease, NewPet, Pet, PetId, PetImage};
use crate::session::{LoginGrant, UserIdentity};

/// Account endpoints (`/users/*`).
#[async_trait::async_trait]
pub trait AccountApi: Send + Sync {
    /// Creates a new account. Does not sign in.
    async fn register(&self, registration: &Registration) -> ApiResult<()>;

    /// Exchanges credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginGrant>;

    /// Fetches the identity behind `token`.
    ///
    /// An invalid or expired token yields [`ApiError::Unauthorized`].
    async fn me(&self, token: &BearerToken) -> ApiResult<UserIdentity>;
}

/// Pet and disease catalog endpoints (`/pets/*`, `/diseases/`).
#[async_trait::async_trait]
pub trait PetApi: Send + Sync {
    async fn list_pets(&self, token: &BearerToken) -> ApiResult<Vec<Pet>>;

    /// Creates a pet, sending the image in the same request when one is given.
    async fn create_pet(
        &self,
        token: &BearerToken,
        pet: &NewPet,
        image: Option<&PetImage>,
    ) -> ApiResult<()>;

    async fn delete_pet(&self, token: &BearerToken, id: PetId) -> ApiResult<()>;

    /// Attaches or replaces a pet's image.
    async fn upload_pet_image(
        &self,
        token: &BearerToken,
        id: PetId,
        image: &PetImage,
    ) -> ApiResult<()>;

    /// Chronic-condition catalog. Does not require a session.
    async fn list_diseases(&self) -> ApiResult<Vec<Disease>>;
}

/// AI question-answering endpoint (`/questions/`).
#[async_trait::async_trait]
pub trait QuestionApi: Send + Sync {
    /// Sends the symptom text and returns the AI answer.
    async fn ask(&self, token: &BearerToken, request: &QuestionRequest) -> ApiResult<String>;
}
