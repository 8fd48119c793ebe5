//! Asset generation.
//!
//! - [`branches`]: one function per independent external call.
//! - [`pipeline`]: runs all branches for a brief and merges what settles.
//! - [`copy`]: standalone copywriting calls (property extraction, landing copy).
//! - [`snapshot`]: static HTML rendering of a finished bundle.

pub mod branches;
pub mod copy;
pub mod pipeline;
pub mod snapshot;
