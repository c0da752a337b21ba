//! The create pipeline: bootstrap storage → build storage → function.
//!
//! The stage order is a single constant rather than call-site discipline,
//! and the runner returns a report of exactly which stages completed so a
//! partial failure never leaves the operator guessing what exists.

use crate::client::AwsClient;
use crate::executor::AwsExecutor;
use crate::stack::{Capability, PollBudget, StackError, StackLifecycle, TemplateSource};
use crate::staging::{self, UploadError};
use stackpilot_core::{StackpilotConfig, bootstrap_template};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Bootstrap,
    Build,
    Deploy,
}

impl StageKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Build => "build",
            Self::Deploy => "deploy",
        }
    }
}

/// Creation order. Each stage depends on its predecessor having completed.
pub const CREATE_ORDER: [StageKind; 3] = [StageKind::Bootstrap, StageKind::Build, StageKind::Deploy];

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

#[derive(Debug)]
pub struct StageFailure {
    pub stage: StageKind,
    pub error: StageError,
}

/// What a pipeline run actually did: completed stages in order, plus the
/// failure that stopped it, if any. No compensating cleanup is attempted —
/// whatever the completed stages created stays up for `down` to remove.
#[derive(Debug)]
pub struct PipelineReport {
    pub completed: Vec<StageKind>,
    pub failed: Option<StageFailure>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }
}

pub struct Pipeline<'a, E: AwsExecutor> {
    client: &'a AwsClient<E>,
    config: &'a StackpilotConfig,
    project_dir: &'a Path,
}

impl<'a, E: AwsExecutor> Pipeline<'a, E> {
    pub fn new(client: &'a AwsClient<E>, config: &'a StackpilotConfig, project_dir: &'a Path) -> Self {
        Self {
            client,
            config,
            project_dir,
        }
    }

    /// Run the stages in [`CREATE_ORDER`], stopping at the first failure.
    pub async fn run(&self) -> PipelineReport {
        let mut completed = Vec::new();

        for stage in CREATE_ORDER {
            tracing::info!(stage = stage.name(), "running stage");
            let result = match stage {
                StageKind::Bootstrap => self.bootstrap().await,
                StageKind::Build => self.build().await,
                StageKind::Deploy => self.deploy().await,
            };

            match result {
                Ok(()) => completed.push(stage),
                Err(error) => {
                    return PipelineReport {
                        completed,
                        failed: Some(StageFailure { stage, error }),
                    };
                }
            }
        }

        PipelineReport {
            completed,
            failed: None,
        }
    }

    fn storage_budget(&self) -> PollBudget {
        PollBudget::new(self.config.poll.delay_secs, self.config.poll.max_attempts)
    }

    fn function_budget(&self) -> PollBudget {
        PollBudget::new(
            self.config.poll.delay_secs,
            self.config.poll.function_max_attempts,
        )
    }

    fn template_url(&self, bucket: &str, key: &str) -> String {
        format!("https://s3.amazonaws.com/{bucket}/{key}")
    }

    /// Create the bootstrap bucket from the inline template (no bucket
    /// exists yet to host a template file), then stage the build-stage
    /// template into it.
    async fn bootstrap(&self) -> Result<(), StageError> {
        let lifecycle = StackLifecycle::new(self.client);
        let body = bootstrap_template(&self.config.buckets.bootstrap);

        lifecycle
            .create(
                &self.config.stacks.bootstrap_storage,
                &TemplateSource::Inline(body),
                &[],
                &self.storage_budget(),
            )
            .await?;

        let template = self.config.artifacts.bucket_template_path(self.project_dir);
        staging::stage_file(
            self.client,
            &template,
            &self.config.buckets.bootstrap,
            &self.config.artifacts.bucket_template,
        )
        .await?;

        Ok(())
    }

    /// Create the build bucket from the template staged by bootstrap, then
    /// stage the function-stack template into it.
    async fn build(&self) -> Result<(), StageError> {
        let lifecycle = StackLifecycle::new(self.client);
        let url = self.template_url(
            &self.config.buckets.bootstrap,
            &self.config.artifacts.bucket_template,
        );

        lifecycle
            .create(
                &self.config.stacks.build_storage,
                &TemplateSource::Url(url),
                &[],
                &self.storage_budget(),
            )
            .await?;

        let template = self
            .config
            .artifacts
            .function_template_path(self.project_dir);
        staging::stage_file(
            self.client,
            &template,
            &self.config.buckets.build,
            &self.config.artifacts.function_template,
        )
        .await?;

        Ok(())
    }

    /// Stage the code archive, then create the function + gateway stack.
    /// The template provisions an IAM role, so creation must carry the
    /// explicit capability acknowledgement, and the stack gets the longer
    /// poll budget.
    async fn deploy(&self) -> Result<(), StageError> {
        let archive = self.config.artifacts.code_archive_path(self.project_dir);
        staging::stage_file(
            self.client,
            &archive,
            &self.config.buckets.build,
            &self.config.artifacts.code_archive,
        )
        .await?;

        let lifecycle = StackLifecycle::new(self.client);
        let url = self.template_url(
            &self.config.buckets.build,
            &self.config.artifacts.function_template,
        );

        lifecycle
            .create(
                &self.config.stacks.function,
                &TemplateSource::Url(url),
                &[Capability::Iam],
                &self.function_budget(),
            )
            .await?;

        Ok(())
    }
}
