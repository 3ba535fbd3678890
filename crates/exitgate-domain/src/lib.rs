//! Domain types shared across exitgate services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Services map these to and from their storage and wire shapes at the edges.

pub mod door;
pub mod id;
pub mod operator;
