//! The two-step conversation wizard.
//!
//! - [`transition`]: the pure, forward-only step function.
//! - [`session`]: session construction and lifecycle helpers.
//! - [`collect`]: one completion turn per collection step.
//! - [`controller`]: drives a session through collection and the pipeline.

pub mod collect;
pub mod controller;
pub mod session;
pub mod transition;
