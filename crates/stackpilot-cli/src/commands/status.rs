use stackpilot_core::StackpilotConfig;
use std::path::PathBuf;

/// Show the provisioned REST API and its deployment stages.
pub async fn status() -> anyhow::Result<()> {
    let config = StackpilotConfig::load(&PathBuf::from("."))?;
    let client = super::client_for(&config);

    let api_id = client
        .describe_stack_resource(&config.stacks.function, super::REST_API_LOGICAL_ID)
        .await?;

    let api = client.get_rest_api(&api_id).await?;
    let stages = client.get_stages(&api_id).await?;

    println!("REST API ({api_id}):");
    println!("{api}");
    println!("Deployment stages:");
    println!("{stages}");

    Ok(())
}
