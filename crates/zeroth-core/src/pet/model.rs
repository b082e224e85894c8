use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned pet identifier.
pub type PetId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetSex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl PetSex {
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for PetSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}

impl std::str::FromStr for PetSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            other => Err(format!("unknown pet sex '{other}', expected M or F")),
        }
    }
}

/// A pet as returned by `GET /pets/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub sex: PetSex,
    pub birth_date: NaiveDate,
    /// Spayed or neutered.
    pub neutered: bool,
    /// Chronic condition, a reference into the disease catalog.
    pub disease_id: Option<i64>,
    /// Decoded image bytes, if the pet has one.
    pub image: Option<Vec<u8>>,
}

impl Pet {
    /// One-line label used when choosing a pet, e.g. `Coco (female)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.sex)
    }
}

/// Pet registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub sex: PetSex,
    pub birth_date: NaiveDate,
    pub neutered: bool,
    pub disease_id: Option<i64>,
}

/// Image file attached to a pet.
#[derive(Clone, PartialEq, Eq)]
pub struct PetImage {
    /// File name sent with the upload; also used to infer the content type.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PetImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl fmt::Debug for PetImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetImage")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Entry of the chronic-condition catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    pub id: i64,
    pub name: String,
}
