//! # cumulus_client
//!
//! Provisioning service client for cumulus.
//!
//! This crate owns the boundary to the remote provisioning service: the
//! typed wire model, the [`Provisioner`] trait, an HTTP backend, and a
//! scripted mock for tests.
//!
//! # Features
//!
//! - **Typed wire model**: closed status enumeration, parameter records,
//!   capability acknowledgements
//! - **Structured faults**: service error codes are classified once at the
//!   transport boundary into [`FaultKind`]
//! - **Mock backend**: scripted describe sequences with captured-call
//!   verification
//!
//! # Example
//!
//! ```rust,no_run
//! use cumulus_client::{HttpProvisioner, Provisioner, ProvisionerConfig, StackRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provisioner = HttpProvisioner::new(
//!         ProvisionerConfig::new("https://provision.example.com").timeout(120),
//!     )?;
//!
//!     let request = StackRequest::new("eu-west-1", "app-stack", "Resources: {}")
//!         .parameter("Environment", "dev");
//!
//!     let stack_id = provisioner.create_stack(&request).await?;
//!     println!("Stack ID: {stack_id}");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod provisioner;
pub mod types;

pub use config::ProvisionerConfig;
pub use error::{ClientError, ClientResult, FaultKind, ServiceFault};
pub use http::{classify_code, HttpProvisioner};
pub use mock::{CapturedCall, DescribeOutcome, MockProvisioner};
pub use provisioner::Provisioner;
pub use types::{
    Capability, Parameter, StackDescription, StackId, StackRequest, StackStatus,
};
