//! Completion provider abstraction.
//!
//! - [`provider::LlmProvider`] is the port hosted completion services implement.
//! - [`box_provider::BoxLlmProvider`] erases the concrete type for runtime selection.
//! - [`request`] builds requests from config and runs plain-text completions.
//! - [`history`] maps a conversation transcript onto completion messages.

pub mod box_provider;
pub mod history;
pub mod provider;
pub mod request;
