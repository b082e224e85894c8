//! HTTP implementation of the 0thOpinion API seams.
//!
//! [`ApiClient`] implements [`zeroth_core::api::AccountApi`],
//! [`zeroth_core::api::PetApi`] and [`zeroth_core::api::QuestionApi`] over
//! `reqwest`. Wire types live in [`dto`] and never leave this crate.

pub mod client;
mod dto;

pub use client::ApiClient;
