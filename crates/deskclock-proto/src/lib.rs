//! Contracts shared between the deskclock crates.
//!
//! The proto crate owns the collaborator ports consumed by the clock widgets
//! and the configuration schema. It does not depend on the async runtime or on
//! any concrete clock, renderer or storage backend.

pub mod config;
pub mod geometry;
pub mod ports;
