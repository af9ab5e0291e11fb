//! Release tooling for a managed application-hosting platform.
//!
//! `eb-publish` uploads a package and registers it as an application version;
//! `eb-deploy` rolls a version out to an environment and verifies the result.
//! Both binaries are thin wrappers over [`cli`].

pub mod app;
pub mod application;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod infra;
pub mod output;
