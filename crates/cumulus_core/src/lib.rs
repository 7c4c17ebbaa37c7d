//! # cumulus_core
//!
//! Stack lifecycle orchestration for cumulus.
//!
//! This crate drives create/update/delete requests against the provisioning
//! service boundary and polls the describe endpoint until a caller-specified
//! terminal status is reached, classifying transient, expected, and failure
//! states along the way.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use cumulus_client::{HttpProvisioner, ProvisionerConfig, StackRequest, StackStatus};
//! use cumulus_core::{ParameterSet, StackLifecycleController, WaitOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provisioner = Arc::new(HttpProvisioner::new(ProvisionerConfig::new(
//!         "https://provision.example.com",
//!     ))?);
//!     let controller = StackLifecycleController::new(provisioner);
//!
//!     let mut params = ParameterSet::new();
//!     params.upsert("Environment", "dev");
//!
//!     let request = StackRequest::new("eu-west-1", "app-stack", "Resources: {}")
//!         .parameters(params.into_vec());
//!
//!     controller.create(&request).await?;
//!     controller
//!         .wait(
//!             "eu-west-1",
//!             "app-stack",
//!             StackStatus::CreateComplete,
//!             &WaitOptions::default(),
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod error;
pub mod params;

pub use controller::{StackLifecycleController, WaitOptions, DEFAULT_POLL_INTERVAL};
pub use error::{StackError, StackResult};
pub use params::ParameterSet;
