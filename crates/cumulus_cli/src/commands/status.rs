//! Status command - Show the current status of a stack.

use anyhow::{Context, Result};
use clap::Args;

use cumulus_client::{HttpProvisioner, Provisioner, ProvisionerConfig};

#[derive(Args)]
pub struct StatusArgs {
    /// Provisioning service endpoint
    #[arg(long, env = "CUMULUS_ENDPOINT")]
    endpoint: String,

    /// Target deployment region
    #[arg(short, long)]
    region: String,

    /// Stack name to inspect
    #[arg(short, long)]
    stack_name: String,
}

pub async fn execute(args: StatusArgs) -> Result<()> {
    let provisioner = HttpProvisioner::new(ProvisionerConfig::new(&args.endpoint))
        .context("failed to build provisioning client")?;

    let description = provisioner
        .describe_stack(&args.region, &args.stack_name)
        .await?;

    println!("Stack:  {}", description.stack_name);
    println!("ID:     {}", description.stack_id);
    println!("Status: {}", description.status);
    if let Some(reason) = &description.status_reason {
        println!("Reason: {reason}");
    }
    if let Some(updated) = description.last_updated {
        println!("As of:  {updated}");
    }

    Ok(())
}
