use mockall::mock;
use stackpilot_cloud::awscli::AwsCliError;
use stackpilot_cloud::client::AwsClient;
use stackpilot_cloud::executor::AwsExecutor;
use stackpilot_cloud::stack::{Capability, TemplateSource};
use std::path::Path;

mock! {
    Executor {}

    impl AwsExecutor for Executor {
        async fn exec(&self, args: &[String]) -> Result<String, AwsCliError>;
    }
}

fn has(args: &[String], s: &str) -> bool {
    args.iter().any(|a| a == s)
}

// ── create-stack ──

#[tokio::test]
async fn create_stack_inline_passes_template_body() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| {
            has(args, "cloudformation")
                && has(args, "create-stack")
                && has(args, "--stack-name")
                && has(args, "BootstrapS3Bucket")
                && has(args, "--template-body")
                && has(args, "Resources: {}")
                && !has(args, "--template-url")
        })
        .returning(|_| Ok("{}".to_owned()));

    let client = AwsClient::with_executor(mock);
    let result = client
        .create_stack(
            "BootstrapS3Bucket",
            &TemplateSource::Inline("Resources: {}".to_owned()),
            &[],
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn create_stack_url_passes_template_url() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| {
            has(args, "--template-url")
                && has(args, "https://s3.amazonaws.com/b/t.yaml")
                && !has(args, "--template-body")
        })
        .returning(|_| Ok("{}".to_owned()));

    let client = AwsClient::with_executor(mock);
    let result = client
        .create_stack(
            "LambdaS3Bucket",
            &TemplateSource::Url("https://s3.amazonaws.com/b/t.yaml".to_owned()),
            &[],
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn create_stack_with_iam_capability() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| has(args, "--capabilities") && has(args, "CAPABILITY_IAM"))
        .returning(|_| Ok("{}".to_owned()));

    let client = AwsClient::with_executor(mock);
    let result = client
        .create_stack(
            "LambdaFunction",
            &TemplateSource::Url("https://s3.amazonaws.com/b/fn.yaml".to_owned()),
            &[Capability::Iam],
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn create_stack_without_capabilities_omits_flag() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| !has(args, "--capabilities"))
        .returning(|_| Ok("{}".to_owned()));

    let client = AwsClient::with_executor(mock);
    let result = client
        .create_stack(
            "BootstrapS3Bucket",
            &TemplateSource::Inline("body".to_owned()),
            &[],
        )
        .await;

    assert!(result.is_ok());
}

// ── stack-status ──

#[tokio::test]
async fn stack_status_returns_trimmed_status() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| {
            has(args, "describe-stacks")
                && has(args, "Stacks[0].StackStatus")
                && has(args, "text")
        })
        .returning(|_| Ok("CREATE_COMPLETE\n".to_owned()));

    let client = AwsClient::with_executor(mock);
    let status = client.stack_status("BootstrapS3Bucket").await.unwrap();

    assert_eq!(status.as_deref(), Some("CREATE_COMPLETE"));
}

#[tokio::test]
async fn stack_status_absent_stack_is_none() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|_| {
        Err(AwsCliError::CommandFailed {
            args: vec![],
            stderr: "An error occurred (ValidationError) when calling the \
                     DescribeStacks operation: Stack with id Gone does not exist"
                .to_owned(),
        })
    });

    let client = AwsClient::with_executor(mock);
    let status = client.stack_status("Gone").await.unwrap();

    assert!(status.is_none());
}

#[tokio::test]
async fn stack_status_other_errors_propagate() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|_| {
        Err(AwsCliError::CommandFailed {
            args: vec![],
            stderr: "An error occurred (AccessDenied) when calling the \
                     DescribeStacks operation: permission denied"
                .to_owned(),
        })
    });

    let client = AwsClient::with_executor(mock);
    let result = client.stack_status("Stack").await;

    assert!(result.is_err());
}

// ── S3 ──

#[tokio::test]
async fn put_object_passes_bucket_key_and_body() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| {
            has(args, "s3api")
                && has(args, "put-object")
                && has(args, "my-bucket")
                && has(args, "template.yaml")
                && has(args, "/tmp/template.yaml")
        })
        .returning(|_| Ok("{}".to_owned()));

    let client = AwsClient::with_executor(mock);
    let result = client
        .put_object("my-bucket", "template.yaml", Path::new("/tmp/template.yaml"))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn list_keys_splits_text_output() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| has(args, "list-objects-v2") && has(args, "Contents[].Key"))
        .returning(|_| Ok("bucket-stack.yaml\tfunction.zip\n".to_owned()));

    let client = AwsClient::with_executor(mock);
    let keys = client.list_keys("my-bucket").await.unwrap();

    assert_eq!(keys, vec!["bucket-stack.yaml", "function.zip"]);
}

#[tokio::test]
async fn list_keys_empty_bucket_prints_none() {
    let mut mock = MockExecutor::new();

    mock.expect_exec().returning(|_| Ok("None\n".to_owned()));

    let client = AwsClient::with_executor(mock);
    let keys = client.list_keys("empty").await.unwrap();

    assert!(keys.is_empty());
}

#[tokio::test]
async fn delete_keys_sends_single_batch_payload() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| {
            let payload = args.iter().find(|a| a.starts_with('{'));
            has(args, "delete-objects")
                && payload.is_some_and(|p| p.contains("\"Key\":\"a.yaml\"") && p.contains("\"Key\":\"b.zip\""))
        })
        .times(1)
        .returning(|_| Ok("{}".to_owned()));

    let client = AwsClient::with_executor(mock);
    let keys = vec!["a.yaml".to_owned(), "b.zip".to_owned()];
    let result = client.delete_keys("my-bucket", &keys).await;

    assert!(result.is_ok());
}

// ── Inspection ──

#[tokio::test]
async fn describe_stack_resource_returns_physical_id() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| {
            has(args, "describe-stack-resource")
                && has(args, "RestApi")
                && has(args, "StackResourceDetail.PhysicalResourceId")
        })
        .returning(|_| Ok("abc123def\n".to_owned()));

    let client = AwsClient::with_executor(mock);
    let id = client
        .describe_stack_resource("LambdaFunction", "RestApi")
        .await
        .unwrap();

    assert_eq!(id, "abc123def");
}

#[tokio::test]
async fn get_rest_api_queries_api_id() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| has(args, "apigateway") && has(args, "get-rest-api") && has(args, "abc123"))
        .returning(|_| Ok("{\"name\": \"api\"}".to_owned()));

    let client = AwsClient::with_executor(mock);
    let out = client.get_rest_api("abc123").await.unwrap();

    assert!(out.contains("api"));
}

// ── Region pinning ──

#[tokio::test]
async fn region_appended_to_every_call() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| {
            let n = args.len();
            n >= 2 && args[n - 2] == "--region" && args[n - 1] == "eu-west-1"
        })
        .returning(|_| Ok("CREATE_COMPLETE\n".to_owned()));

    let client = AwsClient::with_executor(mock).region("eu-west-1");
    let result = client.stack_status("Stack").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn no_region_flag_by_default() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| !has(args, "--region"))
        .returning(|_| Ok("CREATE_COMPLETE\n".to_owned()));

    let client = AwsClient::with_executor(mock);
    let result = client.stack_status("Stack").await;

    assert!(result.is_ok());
}
