//! Shared test utilities for the MetaCHIP config workspace.
//!
//! This crate provides fixtures for tests that need a real installation on
//! disk. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`install`] — [`InstallFixture`] builder for a fake MetaCHIP installation
//!
//! [`InstallFixture`]: install::InstallFixture

pub mod install;
