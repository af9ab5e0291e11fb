//! Shared wire types for the application platform control API.
//!
//! Consumed by the `eb-publish` and `eb-deploy` tools; any server speaking
//! the same JSON shapes can stand in for the hosted control plane.

pub mod types;

pub use types::*;
