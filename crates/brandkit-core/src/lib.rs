//! Business logic and port trait definitions for Brandkit.
//!
//! This crate defines the "ports" (provider and store traits) that the
//! infrastructure layer implements, plus everything that runs between them:
//! prompt construction, tolerant response extraction, the asset pipeline, the
//! conversation wizard and the voice adapter. It depends only on
//! `brandkit-types` -- never on `brandkit-infra` or any HTTP crate.

pub mod assets;
pub mod extract;
pub mod llm;
pub mod prompt;
pub mod repository;
pub mod service;
pub mod voice;
pub mod wizard;

#[cfg(test)]
pub(crate) mod testing;
