//! Restcheckr Library
//!
//! End-to-end test harness for a REST "posts" resource with a
//! register-or-login authentication flow.
//!
//! # Components
//!
//! - **Executor** ([`client`]): one HTTP request per scenario step, with a
//!   flag controlling whether error statuses fail or are returned as data
//! - **Generator** ([`data`]): random post payloads, no fixed fixtures
//! - **Validator** ([`check`]): status / content-type / field-by-field checks
//! - **Orchestrator** ([`scenario`]): chained CRUD and authenticated-create
//!   scenario drivers threading state between steps
//!
//! # Example
//!
//! ```no_run
//! use restcheckr::{config::HarnessConfig, client::ApiClient, data, scenario};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HarnessConfig::from_env()?;
//!     let client = ApiClient::new(&config.api.base_url, &config.http)?;
//!
//!     let mut post = data::random_post();
//!     scenario::lifecycle(&client, &mut post, "Mykhailo", "Shvaliuk").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod check;
pub mod client;
pub mod config;
pub mod data;
pub mod scenario;

// Re-export commonly used types
pub use client::{ApiClient, ApiRequest, ApiResponse};
pub use config::HarnessConfig;
pub use data::PostRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
