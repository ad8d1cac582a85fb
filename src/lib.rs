//! Thin client over AWS SSM Parameter Store.
//!
//! [`ParameterStore`] fetches one parameter, every parameter under a path
//! (following pagination), or writes a `SecureString`. Path fetches come back
//! as [`Parameters`], which can be queried by short name or full path,
//! decoded into a serde struct, or serialized to JSON.
//!
//! ```no_run
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Default)]
//! #[serde(default)]
//! struct Env {
//!     #[serde(rename = "DB_HOST")]
//!     database_host: String,
//!     #[serde(rename = "DB_PORT")]
//!     database_port: u16,
//! }
//!
//! # async fn run() -> paramstore::Result<()> {
//! let store = paramstore::ParameterStore::connect(&paramstore::StoreConfig::from_env()).await;
//! let parameters = store.get_all_parameters_by_path("/my-service/dev/", true).await?;
//! let env: Env = parameters.decode()?;
//! # Ok(())
//! # }
//! ```

pub mod aws;
pub mod config;
mod decode;
pub mod error;
pub mod parameters;

pub use aws::client::{SsmApi, create_ssm_client};
pub use aws::store::ParameterStore;
pub use config::StoreConfig;
pub use error::{ParamStoreError, Result};
pub use parameters::{Parameter, Parameters, json_from_result};
