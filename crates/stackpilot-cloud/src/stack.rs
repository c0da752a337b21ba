//! Stack lifecycle manager: create/delete requests plus the poll loop that
//! drives a stack to a terminal state.

use crate::awscli::AwsCliError;
use crate::client::AwsClient;
use crate::executor::AwsExecutor;
use crate::poll::{self, PollOutcome, Probe};
use std::time::Duration;

/// Where CloudFormation should read the stack's template from.
///
/// Exactly one source per create call, enforced by construction.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Template document passed in the request body.
    Inline(String),
    /// Template hosted in S3, referenced by URL.
    Url(String),
}

/// Provider capability acknowledgements a template may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Template provisions IAM resources; creation is rejected without
    /// this explicit acknowledgement.
    Iam,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iam => "CAPABILITY_IAM",
        }
    }
}

/// Stack lifecycle states, collapsed from CloudFormation's status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackState {
    Creating,
    Created,
    CreateFailed,
    Deleting,
    Deleted,
    DeleteFailed,
}

impl StackState {
    /// Map a CloudFormation stack status to a lifecycle state.
    /// Rollback states count as failed creates: the stack will never reach
    /// `Created` without a new request.
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "CREATE_IN_PROGRESS" | "REVIEW_IN_PROGRESS" => Some(Self::Creating),
            "CREATE_COMPLETE" => Some(Self::Created),
            "CREATE_FAILED" | "ROLLBACK_IN_PROGRESS" | "ROLLBACK_COMPLETE" | "ROLLBACK_FAILED" => {
                Some(Self::CreateFailed)
            }
            "DELETE_IN_PROGRESS" => Some(Self::Deleting),
            "DELETE_COMPLETE" => Some(Self::Deleted),
            "DELETE_FAILED" => Some(Self::DeleteFailed),
            _ => None,
        }
    }
}

/// Fixed-interval poll budget for one stack transition.
#[derive(Debug, Clone, Copy)]
pub struct PollBudget {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl PollBudget {
    pub fn new(delay_secs: u64, max_attempts: u32) -> Self {
        Self {
            delay: Duration::from_secs(delay_secs),
            max_attempts,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StackError {
    #[error("stack '{stack}' already exists")]
    AlreadyExists { stack: String },

    #[error("failed to create stack '{stack}': {detail}")]
    CreateFailed { stack: String, detail: String },

    #[error("failed to delete stack '{stack}': {detail}")]
    DeleteFailed { stack: String, detail: String },

    #[error("gave up waiting on stack '{stack}' after {attempts} attempts")]
    Timeout { stack: String, attempts: u32 },

    #[error(transparent)]
    Provider(#[from] AwsCliError),
}

/// Owns stack-state transitions. Callers never poll or classify provider
/// errors themselves.
pub struct StackLifecycle<'a, E: AwsExecutor> {
    client: &'a AwsClient<E>,
}

impl<'a, E: AwsExecutor> StackLifecycle<'a, E> {
    pub fn new(client: &'a AwsClient<E>) -> Self {
        Self { client }
    }

    /// Create a stack and block until it is `Created`.
    ///
    /// A name collision surfaces as [`StackError::AlreadyExists`] without
    /// touching the existing stack. On timeout or terminal failure the
    /// stack is left in whatever state the provider put it in — no
    /// rollback is attempted.
    pub async fn create(
        &self,
        name: &str,
        template: &TemplateSource,
        capabilities: &[Capability],
        budget: &PollBudget,
    ) -> Result<(), StackError> {
        match self.client.create_stack(name, template, capabilities).await {
            Ok(()) => {}
            Err(e) if e.is_already_exists() => {
                return Err(StackError::AlreadyExists {
                    stack: name.to_owned(),
                });
            }
            Err(e) => {
                return Err(StackError::CreateFailed {
                    stack: name.to_owned(),
                    detail: e.to_string(),
                });
            }
        }

        tracing::debug!(stack = name, "create accepted, waiting");

        let client = self.client;
        let outcome = poll::wait(
            || async move {
                Ok::<_, AwsCliError>(match client.stack_status(name).await? {
                    // Accepted but not visible yet
                    None => Probe::Pending,
                    Some(status) => match StackState::parse(&status) {
                        Some(StackState::Created) => Probe::Ready,
                        Some(StackState::Creating) => Probe::Pending,
                        _ => Probe::Failed(status),
                    },
                })
            },
            budget.delay,
            budget.max_attempts,
        )
        .await?;

        match outcome {
            PollOutcome::Ready => Ok(()),
            PollOutcome::TerminalFailure(status) => Err(StackError::CreateFailed {
                stack: name.to_owned(),
                detail: format!("stack entered {status}"),
            }),
            PollOutcome::Timeout { attempts } => Err(StackError::Timeout {
                stack: name.to_owned(),
                attempts,
            }),
        }
    }

    /// Delete a stack and block until it is gone.
    ///
    /// Deleting an absent stack succeeds immediately — the provider's
    /// delete is idempotent, so no existence check is made first.
    pub async fn delete(&self, name: &str, budget: &PollBudget) -> Result<(), StackError> {
        self.client
            .delete_stack(name)
            .await
            .map_err(|e| StackError::DeleteFailed {
                stack: name.to_owned(),
                detail: e.to_string(),
            })?;

        tracing::debug!(stack = name, "delete accepted, waiting");

        let client = self.client;
        let outcome = poll::wait(
            || async move {
                Ok::<_, AwsCliError>(match client.stack_status(name).await? {
                    None => Probe::Ready,
                    Some(status) => match StackState::parse(&status) {
                        Some(StackState::Deleted) => Probe::Ready,
                        Some(StackState::DeleteFailed) => Probe::Failed(status),
                        // Any pre-delete status means the transition has
                        // not been observed yet
                        _ => Probe::Pending,
                    },
                })
            },
            budget.delay,
            budget.max_attempts,
        )
        .await?;

        match outcome {
            PollOutcome::Ready => Ok(()),
            PollOutcome::TerminalFailure(status) => Err(StackError::DeleteFailed {
                stack: name.to_owned(),
                detail: format!("stack entered {status}"),
            }),
            PollOutcome::Timeout { attempts } => Err(StackError::Timeout {
                stack: name.to_owned(),
                attempts,
            }),
        }
    }
}
