//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the control plane HTTP
//! client, object storage, the system clock, and config file loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod blob;
pub mod clock;
pub mod config;
pub mod platform;
