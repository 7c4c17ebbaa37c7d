//! Delete command - Delete a stack.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use cumulus_client::{HttpProvisioner, ProvisionerConfig, StackStatus};
use cumulus_core::{StackLifecycleController, WaitOptions};

#[derive(Args)]
pub struct DeleteArgs {
    /// Provisioning service endpoint
    #[arg(long, env = "CUMULUS_ENDPOINT")]
    endpoint: String,

    /// Target deployment region
    #[arg(short, long)]
    region: String,

    /// Stack name to delete
    #[arg(short, long)]
    stack_name: String,

    /// Wait until the stack is gone
    #[arg(long)]
    wait: bool,

    /// Seconds between status polls
    #[arg(long, default_value_t = 30)]
    poll_interval: u64,

    /// Overall wait budget in seconds (unbounded when omitted)
    #[arg(long)]
    timeout: Option<u64>,
}

pub async fn execute(args: DeleteArgs) -> Result<()> {
    let provisioner = HttpProvisioner::new(ProvisionerConfig::new(&args.endpoint))
        .context("failed to build provisioning client")?;
    let controller = StackLifecycleController::new(Arc::new(provisioner));

    controller.delete(&args.region, &args.stack_name).await?;

    if args.wait {
        let mut options =
            WaitOptions::default().poll_interval(Duration::from_secs(args.poll_interval));
        if let Some(timeout) = args.timeout {
            options = options.deadline(Duration::from_secs(timeout));
        }

        controller
            .wait(
                &args.region,
                &args.stack_name,
                StackStatus::DeleteComplete,
                &options,
            )
            .await?;
        println!("Stack {} deleted.", args.stack_name);
    } else {
        println!("Deletion requested for stack {}.", args.stack_name);
    }

    Ok(())
}
