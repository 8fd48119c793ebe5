//! Shared domain types for Brandkit.
//!
//! This crate contains the data shapes passed between the wizard, the asset
//! pipeline and the hosted-service adapters: brand drafts, transcripts, asset
//! bundles, media requests, configuration and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod asset;
pub mod brand;
pub mod config;
pub mod error;
pub mod llm;
pub mod media;
pub mod wizard;
