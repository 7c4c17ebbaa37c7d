//! Ensure-index command - Create a vector search index if absent.

use anyhow::Result;
use clap::Args;

use cumulus_search::{Ensured, IndexClient, IndexSpec};

#[derive(Args)]
pub struct EnsureIndexArgs {
    /// Search service endpoint
    #[arg(long, env = "CUMULUS_SEARCH_ENDPOINT")]
    endpoint: String,

    /// Index name
    #[arg(short, long)]
    index: String,

    /// Vector dimension
    #[arg(long, default_value_t = 256)]
    dimension: u32,

    /// Pre-built authorization header value
    #[arg(long, env = "CUMULUS_SEARCH_AUTH")]
    auth: Option<String>,
}

pub async fn execute(args: EnsureIndexArgs) -> Result<()> {
    let mut client = IndexClient::new(&args.endpoint)?;
    if let Some(auth) = &args.auth {
        client = client.auth_header(auth);
    }

    let spec = IndexSpec::default().dimension(args.dimension);

    match client.ensure_index(&args.index, &spec).await? {
        Ensured::Created => println!("Index {} created.", args.index),
        Ensured::AlreadyExists => println!("Index {} already exists.", args.index),
    }

    Ok(())
}
