mod down;
mod status;
mod up;

/// Logical id of the REST API resource in the function stack's template.
pub(crate) const REST_API_LOGICAL_ID: &str = "RestApi";

pub use down::down;
pub use status::status;
pub use up::up;

use stackpilot_cloud::AwsClient;
use stackpilot_core::StackpilotConfig;

/// Client for the configured region, or the CLI default when unset.
pub(crate) fn client_for(config: &StackpilotConfig) -> AwsClient {
    let client = AwsClient::new();
    match &config.project.region {
        Some(region) => client.region(region.clone()),
        None => client,
    }
}
