//! Integration tests for eb-publish and eb-deploy
//!
//! These tests spawn the actual binaries and test end-to-end behavior.
//! None of them reach a real control plane.
