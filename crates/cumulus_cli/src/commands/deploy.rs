//! Deploy command - Create or update a stack and wait for completion.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tracing::info;

use cumulus_client::{FaultKind, HttpProvisioner, ProvisionerConfig, StackRequest, StackStatus};
use cumulus_core::{ParameterSet, StackError, StackLifecycleController, WaitOptions};
use cumulus_template::TemplateSource;

#[derive(Args)]
pub struct DeployArgs {
    /// Provisioning service endpoint
    #[arg(long, env = "CUMULUS_ENDPOINT")]
    endpoint: String,

    /// Target deployment region
    #[arg(short, long)]
    region: String,

    /// Stack name, unique within the region
    #[arg(short, long)]
    stack_name: String,

    /// Path to the template file
    #[arg(short, long)]
    template: PathBuf,

    /// Template parameter as KEY=VALUE (repeatable)
    #[arg(short, long = "param")]
    params: Vec<String>,

    /// Update an existing stack instead of creating one
    #[arg(long)]
    update: bool,

    /// Check the template is well-formed YAML before submitting
    #[arg(long)]
    lint: bool,

    /// Return immediately after the request is accepted
    #[arg(long)]
    no_wait: bool,

    /// Seconds between status polls
    #[arg(long, default_value_t = 30)]
    poll_interval: u64,

    /// Overall wait budget in seconds (unbounded when omitted)
    #[arg(long)]
    timeout: Option<u64>,
}

/// Parse a KEY=VALUE parameter argument.
fn parse_param(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(anyhow!("invalid parameter '{raw}', expected KEY=VALUE")),
    }
}

pub async fn execute(args: DeployArgs) -> Result<()> {
    let source = TemplateSource::new(&args.template);
    let template_body = if args.lint {
        source.load_checked()?
    } else {
        source.load()?
    };

    let mut parameters = ParameterSet::new();
    for raw in &args.params {
        let (key, value) = parse_param(raw)?;
        parameters.upsert(key, value);
    }

    let provisioner = HttpProvisioner::new(ProvisionerConfig::new(&args.endpoint))
        .context("failed to build provisioning client")?;
    let controller = StackLifecycleController::new(Arc::new(provisioner));

    let request = StackRequest::new(&args.region, &args.stack_name, template_body)
        .parameters(parameters.into_vec());

    let expected = if args.update {
        StackStatus::UpdateComplete
    } else {
        StackStatus::CreateComplete
    };

    let outcome = if args.update {
        controller.update(&request).await
    } else {
        controller.create(&request).await
    };

    match outcome {
        Ok(stack_id) => info!("Request accepted. Stack ID: {stack_id}"),
        Err(StackError::Client(e))
            if args.update && e.fault_kind() == Some(FaultKind::NoUpdatesToPerform) =>
        {
            // The deployed state already matches; nothing to wait for.
            println!("Stack {} is already up to date.", args.stack_name);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    if args.no_wait {
        println!("Request submitted for stack {}.", args.stack_name);
        return Ok(());
    }

    let mut options = WaitOptions::default().poll_interval(Duration::from_secs(args.poll_interval));
    if let Some(timeout) = args.timeout {
        options = options.deadline(Duration::from_secs(timeout));
    }

    controller
        .wait(&args.region, &args.stack_name, expected, &options)
        .await?;

    println!("Stack {} reached {expected}.", args.stack_name);
    Ok(())
}
