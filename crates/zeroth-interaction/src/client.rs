//! `reqwest` client for the 0thOpinion REST API.

use crate::dto::{
    DiseaseListResponse, ErrorBody, LoginBody, LoginResponse, MeResponse, NewPetBody,
    PetListResponse, QuestionBody, QuestionResponse, RegisterBody,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use zeroth_core::account::Registration;
use zeroth_core::api::{AccountApi, ApiError, ApiResult, BearerToken, PetApi, QuestionApi};
use zeroth_core::consultation::QuestionRequest;
use zeroth_core::pet::{Disease, NewPet, Pet, PetId, PetImage};
use zeroth_core::session::{LoginGrant, UserIdentity};

/// HTTP implementation of every API seam.
///
/// Holds no credential: authenticated calls take the caller's token and set
/// the `Authorization` header on that request only.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Uses a preconfigured `reqwest` client (proxy, TLS, timeouts).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> ApiResult<Response> {
        tracing::debug!("[Api] {}", endpoint);
        let response = request.send().await.map_err(|err| {
            tracing::warn!("[Api] {} failed before a response: {}", endpoint, err);
            ApiError::transport(format!("{endpoint}: {err}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = map_http_error(status, &body);
        tracing::warn!("[Api] {} returned {}: {}", endpoint, status.as_u16(), err);
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, endpoint).await?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::transport(format!("{endpoint}: {err}")))?;
        serde_json::from_slice(&body).map_err(|err| {
            ApiError::unexpected(
                Some(status),
                Some(format!("Failed to parse {endpoint} response: {err}")),
            )
        })
    }
}

#[async_trait]
impl AccountApi for ApiClient {
    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        let request = self
            .client
            .post(self.url("/users/register"))
            .json(&RegisterBody::from(registration));
        self.send(request, "POST /users/register").await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginGrant> {
        let request = self
            .client
            .post(self.url("/users/login"))
            .json(&LoginBody { email, password });
        let response: LoginResponse = self.send_json(request, "POST /users/login").await?;
        response.into_grant()
    }

    async fn me(&self, token: &BearerToken) -> ApiResult<UserIdentity> {
        let request = self
            .client
            .get(self.url("/users/me"))
            .bearer_auth(token.as_str());
        let me: MeResponse = self.send_json(request, "GET /users/me").await?;
        Ok(me.into())
    }
}

#[async_trait]
impl PetApi for ApiClient {
    async fn list_pets(&self, token: &BearerToken) -> ApiResult<Vec<Pet>> {
        let request = self.client.get(self.url("/pets/")).bearer_auth(token.as_str());
        let response: PetListResponse = self.send_json(request, "GET /pets/").await?;
        Ok(response.into_pets())
    }

    async fn create_pet(
        &self,
        token: &BearerToken,
        pet: &NewPet,
        image: Option<&PetImage>,
    ) -> ApiResult<()> {
        let body = NewPetBody::from(pet);
        let request = self
            .client
            .post(self.url("/pets/"))
            .bearer_auth(token.as_str());
        let request = match image {
            None => request.json(&body),
            Some(image) => {
                let form = body
                    .form_fields()
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                request.multipart(form.part("image", image_part(image)?))
            }
        };
        self.send(request, "POST /pets/").await?;
        Ok(())
    }

    async fn delete_pet(&self, token: &BearerToken, id: PetId) -> ApiResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/pets/{id}")))
            .bearer_auth(token.as_str());
        self.send(request, "DELETE /pets/{id}").await?;
        Ok(())
    }

    async fn upload_pet_image(
        &self,
        token: &BearerToken,
        id: PetId,
        image: &PetImage,
    ) -> ApiResult<()> {
        let form = Form::new().part("image", image_part(image)?);
        let request = self
            .client
            .post(self.url(&format!("/pets/{id}/image")))
            .bearer_auth(token.as_str())
            .multipart(form);
        self.send(request, "POST /pets/{id}/image").await?;
        Ok(())
    }

    async fn list_diseases(&self) -> ApiResult<Vec<Disease>> {
        let request = self.client.get(self.url("/diseases/"));
        let response: DiseaseListResponse = self.send_json(request, "GET /diseases/").await?;
        Ok(response.into_diseases())
    }
}

#[async_trait]
impl QuestionApi for ApiClient {
    async fn ask(&self, token: &BearerToken, request: &QuestionRequest) -> ApiResult<String> {
        let builder = self
            .client
            .post(self.url("/questions/"))
            .bearer_auth(token.as_str())
            .json(&QuestionBody::from(request));
        let response: QuestionResponse = self.send_json(builder, "POST /questions/").await?;
        Ok(response.ai_answer)
    }
}

fn image_part(image: &PetImage) -> ApiResult<Part> {
    let mime = mime_guess::from_path(&image.file_name).first_or_octet_stream();
    Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(mime.essence_str())
        .map_err(|err| ApiError::unexpected(None, Some(format!("invalid image type: {err}"))))
}

/// Maps a non-success response to the tagged error.
///
/// 401 is always `Unauthorized`. Other 4xx responses that carry a message
/// become `Validation`; everything else is `Unexpected`.
pub(crate) fn map_http_error(status: StatusCode, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::text);

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::unauthorized(detail);
    }

    match detail {
        Some(message) if status.is_client_error() => ApiError::validation(status.as_u16(), message),
        detail => ApiError::unexpected(Some(status.as_u16()), detail),
    }
}
