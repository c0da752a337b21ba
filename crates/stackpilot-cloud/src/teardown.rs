//! Teardown orchestrator: empty the buckets, then delete the stacks in
//! reverse creation order, stopping at the first failure.

use crate::awscli::AwsCliError;
use crate::client::AwsClient;
use crate::executor::AwsExecutor;
use crate::stack::{PollBudget, StackError, StackLifecycle};
use stackpilot_core::StackpilotConfig;

#[derive(Debug)]
pub enum TeardownFailure {
    /// A bucket could not be emptied; no stack deletion was issued after
    /// this point.
    EmptyBucket { bucket: String, error: AwsCliError },
    /// A stack deletion failed; later stacks were left untouched.
    DeleteStack { stack: String, error: StackError },
}

impl TeardownFailure {
    pub fn describe(&self) -> String {
        match self {
            Self::EmptyBucket { bucket, error } => {
                format!("emptying bucket '{bucket}' failed: {error}")
            }
            Self::DeleteStack { stack, error } => {
                format!("deleting stack '{stack}' failed: {error}")
            }
        }
    }
}

/// What a teardown run actually did, in execution order.
#[derive(Debug)]
pub struct TeardownReport {
    pub emptied: Vec<String>,
    pub deleted: Vec<String>,
    pub failed: Option<TeardownFailure>,
}

impl TeardownReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }
}

pub struct Teardown<'a, E: AwsExecutor> {
    client: &'a AwsClient<E>,
    config: &'a StackpilotConfig,
}

impl<'a, E: AwsExecutor> Teardown<'a, E> {
    pub fn new(client: &'a AwsClient<E>, config: &'a StackpilotConfig) -> Self {
        Self { client, config }
    }

    /// Empty both buckets, then delete [function, build storage, bootstrap
    /// storage] — the exact reverse of creation order. The provider
    /// refuses to delete a stack owning a non-empty bucket, so emptying
    /// always happens first.
    pub async fn run(&self) -> TeardownReport {
        let mut emptied = Vec::new();
        let mut deleted = Vec::new();

        for bucket in [&self.config.buckets.bootstrap, &self.config.buckets.build] {
            match self.empty_bucket(bucket).await {
                Ok(()) => emptied.push(bucket.clone()),
                // A bucket that was never created has nothing to empty;
                // its stack deletion below is a no-op too.
                Err(e) if e.is_missing_bucket() => {
                    tracing::debug!(%bucket, "bucket absent, nothing to empty");
                }
                Err(error) => {
                    return TeardownReport {
                        emptied,
                        deleted,
                        failed: Some(TeardownFailure::EmptyBucket {
                            bucket: bucket.clone(),
                            error,
                        }),
                    };
                }
            }
        }

        let storage_budget =
            PollBudget::new(self.config.poll.delay_secs, self.config.poll.max_attempts);
        let function_budget = PollBudget::new(
            self.config.poll.delay_secs,
            self.config.poll.function_max_attempts,
        );

        let order = [
            (&self.config.stacks.function, function_budget),
            (&self.config.stacks.build_storage, storage_budget),
            (&self.config.stacks.bootstrap_storage, storage_budget),
        ];

        let lifecycle = StackLifecycle::new(self.client);
        for (stack, budget) in order {
            tracing::info!(%stack, "deleting stack");
            match lifecycle.delete(stack, &budget).await {
                Ok(()) => deleted.push(stack.clone()),
                Err(error) => {
                    return TeardownReport {
                        emptied,
                        deleted,
                        failed: Some(TeardownFailure::DeleteStack {
                            stack: stack.clone(),
                            error,
                        }),
                    };
                }
            }
        }

        TeardownReport {
            emptied,
            deleted,
            failed: None,
        }
    }

    async fn empty_bucket(&self, bucket: &str) -> Result<(), AwsCliError> {
        let keys = self.client.list_keys(bucket).await?;
        if keys.is_empty() {
            return Ok(());
        }

        tracing::debug!(bucket, count = keys.len(), "deleting objects");
        self.client.delete_keys(bucket, &keys).await
    }
}
