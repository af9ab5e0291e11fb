//! Domain layer: pure release logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod deploy;
pub mod error;
pub mod package;

pub use config::{BlobStoreConfig, DeployConfig, PlatformConfig, ReleaseConfig};
pub use deploy::{DeploySettings, Verdict};
pub use error::{ConfigError, DeployFailure, PackageError, PlatformError};
pub use package::{default_description, storage_key};
