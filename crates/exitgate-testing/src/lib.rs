//! Test utilities for exitgate services.
//!
//! Import from `[dev-dependencies]` only.

pub mod auth;
