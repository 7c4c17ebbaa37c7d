//! CLI command definitions.
//!
//! Each subcommand maps to one lifecycle operation against the provisioning
//! service or the search endpoint.

use clap::{Parser, Subcommand};

pub mod delete;
pub mod deploy;
pub mod ensure_index;
pub mod status;

/// Cumulus - declarative infrastructure deployment orchestrator
#[derive(Parser)]
#[command(name = "cumulus")]
#[command(version, about = "Cumulus - declarative infrastructure deployment orchestrator")]
#[command(long_about = r#"
Cumulus drives a remote provisioning service through create/update/delete
lifecycle operations and polls until the stack reaches a terminal state.

WORKFLOWS:
  deploy        → Create or update a stack from a template and wait
  delete        → Delete a stack (optionally wait for disappearance)
  status        → Print the current status of a stack
  ensure-index  → Create a vector search index if it does not exist

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Stack operation failure
  4 - Template error
  5 - Search index error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or update a stack from a template
    Deploy(deploy::DeployArgs),

    /// Delete a stack
    Delete(delete::DeleteArgs),

    /// Show the current status of a stack
    Status(status::StatusArgs),

    /// Create a vector search index if absent
    #[command(name = "ensure-index")]
    EnsureIndex(ensure_index::EnsureIndexArgs),
}
