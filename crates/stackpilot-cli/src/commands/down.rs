use stackpilot_cloud::Teardown;
use stackpilot_core::StackpilotConfig;
use std::io::Write;
use std::path::PathBuf;

/// Empty the buckets, then delete the stacks in reverse creation order.
pub async fn down(skip_confirm: bool) -> anyhow::Result<()> {
    let project_dir = PathBuf::from(".");
    let config = StackpilotConfig::load(&project_dir)?;

    if !skip_confirm {
        println!("This will delete:");
        println!("  - stack '{}' (function + gateway)", config.stacks.function);
        println!(
            "  - stack '{}' and bucket '{}'",
            config.stacks.build_storage, config.buckets.build
        );
        println!(
            "  - stack '{}' and bucket '{}'",
            config.stacks.bootstrap_storage, config.buckets.bootstrap
        );
        println!("  All objects in both buckets are removed first.");

        println!();
        print!("Are you sure? [y/N] ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !matches!(input.trim(), "y" | "Y" | "yes" | "YES") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let client = super::client_for(&config);
    let report = Teardown::new(&client, &config).run().await;

    for bucket in &report.emptied {
        println!("  Emptied bucket '{bucket}'");
    }
    for stack in &report.deleted {
        println!("  Deleted stack '{stack}'");
    }

    match report.failed {
        None => {
            println!();
            println!("Teardown complete.");
            Ok(())
        }
        Some(failure) => {
            anyhow::bail!(
                "teardown stopped: {}\nRemaining stacks were left untouched.",
                failure.describe()
            );
        }
    }
}
