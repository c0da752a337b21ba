use crate::awscli::AwsCliError;
use crate::executor::{AwsExecutor, RealExecutor};
use crate::stack::{Capability, TemplateSource};
use std::path::Path;

/// AWS operations client, parameterized over the executor for testability.
///
/// Each method is a single one-shot CLI invocation; state machines and
/// polling live in [`crate::stack`] and [`crate::poll`].
pub struct AwsClient<E: AwsExecutor = RealExecutor> {
    executor: E,
    region: Option<String>,
}

impl AwsClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
            region: None,
        }
    }
}

impl Default for AwsClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: AwsExecutor> AwsClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor,
            region: None,
        }
    }

    /// Pin every call to a region instead of the CLI's configured default.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    async fn run(&self, mut cmd: Vec<String>) -> Result<String, AwsCliError> {
        if let Some(region) = &self.region {
            cmd.push("--region".to_owned());
            cmd.push(region.clone());
        }
        self.executor.exec(&cmd).await
    }

    // ── CloudFormation ──

    /// Issue a create-stack request. Returns as soon as the provider accepts
    /// it; the stack is still provisioning.
    pub async fn create_stack(
        &self,
        name: &str,
        template: &TemplateSource,
        capabilities: &[Capability],
    ) -> Result<(), AwsCliError> {
        let mut cmd = args(["cloudformation", "create-stack", "--stack-name", name]);

        match template {
            TemplateSource::Inline(body) => {
                cmd.push("--template-body".to_owned());
                cmd.push(body.clone());
            }
            TemplateSource::Url(url) => {
                cmd.push("--template-url".to_owned());
                cmd.push(url.clone());
            }
        }

        if !capabilities.is_empty() {
            cmd.push("--capabilities".to_owned());
            for cap in capabilities {
                cmd.push(cap.as_str().to_owned());
            }
        }

        self.run(cmd).await?;
        Ok(())
    }

    /// Issue a delete-stack request. The provider treats deletion of an
    /// absent stack as success, so no existence check is made here.
    pub async fn delete_stack(&self, name: &str) -> Result<(), AwsCliError> {
        self.run(args([
            "cloudformation",
            "delete-stack",
            "--stack-name",
            name,
        ]))
        .await?;
        Ok(())
    }

    /// Current stack status, or `None` when the stack does not exist.
    pub async fn stack_status(&self, name: &str) -> Result<Option<String>, AwsCliError> {
        let result = self
            .run(args([
                "cloudformation",
                "describe-stacks",
                "--stack-name",
                name,
                "--query",
                "Stacks[0].StackStatus",
                "--output",
                "text",
            ]))
            .await;

        match result {
            Ok(output) => Ok(Some(output.trim().to_owned())),
            Err(e) if e.is_missing_stack() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Physical resource id of a logical resource in a stack.
    pub async fn describe_stack_resource(
        &self,
        stack_name: &str,
        logical_id: &str,
    ) -> Result<String, AwsCliError> {
        let output = self
            .run(args([
                "cloudformation",
                "describe-stack-resource",
                "--stack-name",
                stack_name,
                "--logical-resource-id",
                logical_id,
                "--query",
                "StackResourceDetail.PhysicalResourceId",
                "--output",
                "text",
            ]))
            .await?;

        Ok(output.trim().to_owned())
    }

    // ── S3 ──

    /// Upload a local file, overwriting any existing object at the key.
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
    ) -> Result<(), AwsCliError> {
        let mut cmd = args([
            "s3api",
            "put-object",
            "--bucket",
            bucket,
            "--key",
            key,
            "--body",
        ]);
        cmd.push(local_path.to_string_lossy().into_owned());

        self.run(cmd).await?;
        Ok(())
    }

    /// All object keys in a bucket.
    pub async fn list_keys(&self, bucket: &str) -> Result<Vec<String>, AwsCliError> {
        let output = self
            .run(args([
                "s3api",
                "list-objects-v2",
                "--bucket",
                bucket,
                "--query",
                "Contents[].Key",
                "--output",
                "text",
            ]))
            .await?;

        // The CLI prints "None" for a null (empty) Contents list.
        let trimmed = output.trim();
        if trimmed.is_empty() || trimmed == "None" {
            return Ok(Vec::new());
        }
        Ok(trimmed.split_whitespace().map(ToOwned::to_owned).collect())
    }

    /// Delete a set of keys in a single batch request.
    pub async fn delete_keys(&self, bucket: &str, keys: &[String]) -> Result<(), AwsCliError> {
        let objects: Vec<_> = keys
            .iter()
            .map(|k| serde_json::json!({ "Key": k }))
            .collect();
        let payload = serde_json::json!({ "Objects": objects, "Quiet": true });

        let mut cmd = args(["s3api", "delete-objects", "--bucket", bucket, "--delete"]);
        cmd.push(payload.to_string());

        self.run(cmd).await?;
        Ok(())
    }

    // ── API Gateway (read-only inspection) ──

    pub async fn get_rest_api(&self, api_id: &str) -> Result<String, AwsCliError> {
        self.run(args([
            "apigateway",
            "get-rest-api",
            "--rest-api-id",
            api_id,
        ]))
        .await
    }

    pub async fn get_stages(&self, api_id: &str) -> Result<String, AwsCliError> {
        self.run(args(["apigateway", "get-stages", "--rest-api-id", api_id]))
            .await
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}
