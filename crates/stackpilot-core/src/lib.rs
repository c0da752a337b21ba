//! Core types and configuration for stackpilot.
//!
//! This crate defines the `stackpilot.toml` schema ([`StackpilotConfig`]),
//! the inline bootstrap template renderer, and shared error types.

pub mod config;
pub mod error;
pub mod template;

pub use config::{
    ArtifactConfig, BucketConfig, PollConfig, ProjectConfig, StackConfig, StackpilotConfig,
};
pub use error::{Error, Result};
pub use template::bootstrap_template;
