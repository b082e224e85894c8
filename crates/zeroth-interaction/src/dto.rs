//! Wire representations of the REST API bodies.
//!
//! Field names follow the server exactly, including its mixed casing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use zeroth_core::account::Registration;
use zeroth_core::api::{ApiError, ApiResult, BearerToken};
use zeroth_core::consultation::QuestionRequest;
use zeroth_core::pet::{Disease, NewPet, Pet, PetSex};
use zeroth_core::session::{LoginGrant, UserIdentity};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize)]
pub(crate) struct RegisterBody<'a> {
    #[serde(rename = "User_name")]
    user_name: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
    #[serde(rename = "Screen_name")]
    screen_name: &'a str,
    #[serde(rename = "Sex")]
    sex: &'static str,
    #[serde(rename = "Birth_date")]
    birth_date: String,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
}

impl<'a> From<&'a Registration> for RegisterBody<'a> {
    fn from(r: &'a Registration) -> Self {
        Self {
            user_name: &r.user_name,
            password: &r.password,
            screen_name: &r.screen_name,
            sex: r.sex.code(),
            birth_date: r.birth_date.format(DATE_FORMAT).to_string(),
            address: &r.address,
            email: &r.email,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct LoginBody<'a> {
    #[serde(rename = "Email")]
    pub email: &'a str,
    #[serde(rename = "Password")]
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    access_token: String,
    #[serde(default)]
    screen_name: String,
}

impl LoginResponse {
    pub fn into_grant(self) -> ApiResult<LoginGrant> {
        if self.access_token.is_empty() {
            return Err(ApiError::unexpected(
                Some(200),
                Some("login response without access_token".into()),
            ));
        }
        Ok(LoginGrant {
            token: BearerToken::new(self.access_token),
            screen_name: self.screen_name,
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct MeResponse {
    email: String,
    screen_name: String,
}

impl From<MeResponse> for UserIdentity {
    fn from(me: MeResponse) -> Self {
        Self {
            email: me.email,
            screen_name: me.screen_name,
        }
    }
}

/// Records are decoded one at a time so a single bad entry cannot hide the rest.
#[derive(Deserialize)]
pub(crate) struct PetListResponse {
    #[serde(default)]
    pets: Vec<serde_json::Value>,
}

impl PetListResponse {
    pub fn into_pets(self) -> Vec<Pet> {
        self.pets
            .into_iter()
            .filter_map(|raw| {
                let pet = serde_json::from_value::<PetDto>(raw)
                    .map_err(|e| ApiError::unexpected(Some(200), Some(e.to_string())))
                    .and_then(PetDto::into_pet);
                match pet {
                    Ok(pet) => Some(pet),
                    Err(e) => {
                        tracing::warn!("[Api] Skipping pet record: {}", e);
                        None
                    }
                }
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct PetDto {
    #[serde(rename = "Pet_id")]
    pet_id: i64,
    #[serde(rename = "Pet_name")]
    pet_name: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Birth_date", default)]
    birth_date: Option<String>,
    #[serde(rename = "Neuter_Spay", default)]
    neuter_spay: bool,
    #[serde(default)]
    disease_id: Option<i64>,
    #[serde(default)]
    image: Option<String>,
}

impl PetDto {
    fn into_pet(self) -> ApiResult<Pet> {
        let sex: PetSex = self
            .gender
            .parse()
            .map_err(|e: String| ApiError::unexpected(Some(200), Some(e)))?;
        let birth_date = match self.birth_date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => {
                return Err(ApiError::unexpected(
                    Some(200),
                    Some(format!("pet {} has no Birth_date", self.pet_id)),
                ));
            }
        };
        // an undecodable image is dropped; the pet is kept
        let image = match self.image.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(encoded) => decode_image(encoded)
                .inspect_err(|e| {
                    tracing::warn!("[Api] Dropping image of pet {}: {}", self.pet_id, e)
                })
                .ok(),
        };
        Ok(Pet {
            id: self.pet_id,
            name: self.pet_name,
            sex,
            birth_date,
            neutered: self.neuter_spay,
            disease_id: self.disease_id,
            image,
        })
    }
}

/// JSON body of `POST /pets/` when no image is attached.
#[derive(Serialize)]
pub(crate) struct NewPetBody<'a> {
    #[serde(rename = "Pet_name")]
    pet_name: &'a str,
    #[serde(rename = "Gender")]
    gender: &'static str,
    #[serde(rename = "Birth_date")]
    birth_date: String,
    #[serde(rename = "Neuter_Spay")]
    neuter_spay: bool,
    disease_id: Option<i64>,
}

impl<'a> From<&'a NewPet> for NewPetBody<'a> {
    fn from(pet: &'a NewPet) -> Self {
        Self {
            pet_name: &pet.name,
            gender: pet.sex.code(),
            birth_date: pet.birth_date.format(DATE_FORMAT).to_string(),
            neuter_spay: pet.neutered,
            disease_id: pet.disease_id,
        }
    }
}

impl NewPetBody<'_> {
    /// Text parts of the multipart variant, in field order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Pet_name", self.pet_name.to_string()),
            ("Gender", self.gender.to_string()),
            ("Birth_date", self.birth_date.clone()),
            ("Neuter_Spay", self.neuter_spay.to_string()),
        ];
        if let Some(id) = self.disease_id {
            fields.push(("disease_id", id.to_string()));
        }
        fields
    }
}

#[derive(Deserialize)]
pub(crate) struct DiseaseDto {
    disease_id: i64,
    disease_name: String,
}

/// `GET /diseases/` has been seen both as a bare array and wrapped.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum DiseaseListResponse {
    Bare(Vec<DiseaseDto>),
    Wrapped { diseases: Vec<DiseaseDto> },
}

impl DiseaseListResponse {
    pub fn into_diseases(self) -> Vec<Disease> {
        let list = match self {
            Self::Bare(list) | Self::Wrapped { diseases: list } => list,
        };
        list.into_iter()
            .map(|d| Disease {
                id: d.disease_id,
                name: d.disease_name,
            })
            .collect()
    }
}

#[derive(Serialize)]
pub(crate) struct QuestionBody<'a> {
    #[serde(rename = "Content")]
    content: &'a str,
    #[serde(rename = "Pet_id")]
    pet_id: i64,
}

impl<'a> From<&'a QuestionRequest> for QuestionBody<'a> {
    fn from(request: &'a QuestionRequest) -> Self {
        Self {
            content: &request.content,
            pet_id: request.pet_id,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct QuestionResponse {
    #[serde(rename = "AI_answer")]
    pub ai_answer: String,
}

/// Error payload; the server uses either key.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    message: Option<String>,
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The human-readable message, if the body carries a string one.
    pub fn text(self) -> Option<String> {
        self.message
            .or_else(|| match self.detail {
                Some(serde_json::Value::String(s)) => Some(s),
                _ => None,
            })
            .filter(|s| !s.trim().is_empty())
    }
}

/// Accepts `YYYY-MM-DD` with or without a trailing time part.
fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, DATE_FORMAT).map_err(|e| {
        ApiError::unexpected(Some(200), Some(format!("invalid Birth_date '{raw}': {e}")))
    })
}

fn decode_image(encoded: &str) -> ApiResult<Vec<u8>> {
    // data URLs carry the payload after the comma
    let payload = encoded
        .split_once(',')
        .filter(|(prefix, _)| prefix.starts_with("data:"))
        .map_or(encoded, |(_, data)| data);
    STANDARD
        .decode(payload)
        .map_err(|e| ApiError::unexpected(Some(200), Some(format!("invalid pet image: {e}"))))
}
