//! Cumulus CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Stack operation failure
//! - 4: Template error
//! - 5: Search index error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

use cumulus_core::StackError;
use cumulus_search::SearchError;
use cumulus_template::TemplateError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    // 2 is emitted by clap itself for invalid arguments.
    pub const STACK_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const SEARCH_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("cumulus_core=info".parse().unwrap())
                .add_directive("cumulus_client=info".parse().unwrap())
                .add_directive("cumulus_template=info".parse().unwrap())
                .add_directive("cumulus_search=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Deploy(args) => commands::deploy::execute(args).await,
        Commands::Delete(args) => commands::delete::execute(args).await,
        Commands::Status(args) => commands::status::execute(args).await,
        Commands::EnsureIndex(args) => commands::ensure_index::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
///
/// Invalid arguments never reach here; clap reports them itself with exit
/// code 2.
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<StackError>().is_some() {
        ExitCodes::STACK_FAILURE
    } else if e.downcast_ref::<TemplateError>().is_some() {
        ExitCodes::TEMPLATE_ERROR
    } else if e.downcast_ref::<SearchError>().is_some() {
        ExitCodes::SEARCH_ERROR
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
