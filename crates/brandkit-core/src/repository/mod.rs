//! Storage port traits.

pub mod session;
