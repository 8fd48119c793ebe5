//! Image generation and stock-photo search adapters.

pub mod dalle;
pub mod unsplash;
