use stackpilot_cloud::Pipeline;
use stackpilot_core::StackpilotConfig;
use std::path::PathBuf;

/// Run the create pipeline: bootstrap storage → build storage → function.
pub async fn up() -> anyhow::Result<()> {
    let project_dir = PathBuf::from(".");
    let config = StackpilotConfig::load(&project_dir)?;

    // Every staged artifact is needed before the first stack goes up;
    // fail here rather than after the bootstrap stack exists.
    for path in [
        config.artifacts.bucket_template_path(&project_dir),
        config.artifacts.function_template_path(&project_dir),
        config.artifacts.code_archive_path(&project_dir),
    ] {
        if !path.is_file() {
            anyhow::bail!(
                "required artifact not found: {} — check the [artifacts] \
                 section of stackpilot.toml",
                path.display()
            );
        }
    }

    let client = super::client_for(&config);
    tracing::info!(region = ?config.project.region, "starting pipeline");

    println!("Creating stacks (bootstrap → build → deploy)...");
    let report = Pipeline::new(&client, &config, &project_dir).run().await;

    for stage in &report.completed {
        println!("  {} stage complete", stage.name());
    }

    match report.failed {
        None => {
            println!();
            println!("All three stacks created.");
            println!("  Inspect the gateway with: stackpilot status");
            Ok(())
        }
        Some(failure) => {
            anyhow::bail!(
                "{} stage failed: {}\n\
                 Completed stages were left up — run `stackpilot down` to remove them.",
                failure.stage.name(),
                failure.error
            );
        }
    }
}
