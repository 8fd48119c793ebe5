//! Ports for the hosted non-completion services.
//!
//! Each trait is implemented in brandkit-infra against a concrete vendor API
//! and mocked in tests. All of them use native async fn in traits (RPITIT).

pub mod image;
pub mod logo;
pub mod speech;
pub mod upload;
