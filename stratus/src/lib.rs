//! Benchmark scenarios for an OpenStack-compatible compute API.
//!
//! Each scenario is a short sequence of remote calls against a
//! [`ComputeApi`] client, paired with a declarative [`ScenarioSpec`]
//! record that tells a benchmarking harness what the scenario needs
//! (backend services, authenticated users, input resolution) and which
//! resource namespaces to sweep afterwards. The harness owns everything
//! else: scheduling, retries, concurrency, and cleanup.
//!
//! # Example
//! ```no_run
//! use stratus::prelude::*;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScenarioError> {
//!     let compute = HttpComputeClient::new(Url::parse("http://localhost:3010").unwrap());
//!     let args = ScenarioArgs::default();
//!
//!     for entry in builtin_scenarios() {
//!         if entry.spec.conversions.is_empty() {
//!             (entry.run)(&compute, &args).await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`ScenarioSpec`]: stratus_core::ScenarioSpec

pub mod client;
pub mod registry;
pub mod scenarios;

pub(crate) mod name;

pub use stratus_core as core;

pub use client::{ApiError, ComputeApi, HttpComputeClient};
pub use registry::{builtin_scenarios, ScenarioArgs, ScenarioEntry};
pub use scenarios::ScenarioError;

pub mod prelude {
    pub use crate::client::{ApiError, ComputeApi, HttpComputeClient};
    pub use crate::registry::{builtin_scenarios, ScenarioArgs, ScenarioEntry};
    pub use crate::scenarios::compat::BootArgs;
    pub use crate::scenarios::ScenarioError;
    pub use stratus_core::{
        BootParams, CleanupScope, FlavorRef, ImageRef, InputConversion, KeyType, Keypair,
        KeypairParams, ResourceKind, ScenarioSpec, Server, Service,
    };
}
