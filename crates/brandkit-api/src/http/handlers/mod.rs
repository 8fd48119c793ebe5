//! HTTP request handlers for the REST API.

pub mod assets;
pub mod chat;
pub mod extract;
pub mod session;
pub mod speech;
pub mod upload;
