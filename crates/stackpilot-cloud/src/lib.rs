//! AWS operations for stackpilot, issued through the `aws` CLI.
//!
//! The [`AwsExecutor`] trait is the seam between the orchestration logic and
//! the outside world: production code runs the real CLI, tests substitute
//! mockall doubles.

pub mod awscli;
pub mod client;
pub mod executor;
pub mod pipeline;
pub mod poll;
pub mod stack;
pub mod staging;
pub mod teardown;

pub use awscli::AwsCliError;
pub use client::AwsClient;
pub use executor::{AwsExecutor, RealExecutor};
pub use pipeline::{CREATE_ORDER, Pipeline, PipelineReport, StageError, StageFailure, StageKind};
pub use poll::{PollOutcome, Probe};
pub use stack::{Capability, PollBudget, StackError, StackLifecycle, StackState, TemplateSource};
pub use staging::{UploadError, stage_file};
pub use teardown::{Teardown, TeardownFailure, TeardownReport};
