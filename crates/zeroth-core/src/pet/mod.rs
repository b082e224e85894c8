//! Pet domain module.
//!
//! - `model`: pet records, the create form, images and the disease catalog
//! - `service`: authenticated pet operations on top of [`crate::api::PetApi`]

mod model;
mod service;

pub use model::{Disease, NewPet, Pet, PetId, PetImage, PetSex};
pub use service::PetService;
