//! Infrastructure layer for Brandkit.
//!
//! Concrete implementations of the ports defined in `brandkit-core`: the
//! OpenAI-compatible completion provider, image generation and search, speech
//! synthesis and transcription, signed image upload and the logo service.
//! Also holds config loading, API-key resolution, the in-memory session store
//! and the snapshot writer.

pub mod config;
mod http;
pub mod images;
pub mod llm;
pub mod logo;
pub mod session_store;
pub mod snapshot;
pub mod speech;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_server;
