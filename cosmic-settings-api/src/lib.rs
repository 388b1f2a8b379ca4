//! # cosmic-settings-api
//!
//! Typed client for the management API operations behind the global settings console:
//! global configuration settings, LDAP server configuration and hypervisor capability
//! limits.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use cosmic_settings_api::{HttpInvoker, ManagementClient, PaginationParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let invoker = HttpInvoker::builder("https://cloud.example.com/client/api")
//!         .session_key("session-key")
//!         .build()?;
//!     let client = ManagementClient::new(Arc::new(invoker));
//!
//!     let page = client
//!         .list_ldap_configurations(&PaginationParams::default(), None)
//!         .await?;
//!     for ldap in &page.items {
//!         println!("{}:{}", ldap.hostname, ldap.port);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, ApiError>`](ApiError). A response that lacks the
//! envelope or entity key its operation nests results under fails with
//! [`ApiError::EnvelopeMismatch`]; it never decodes to an empty or partial value.
//!
//! Nothing is retried.

mod client;
mod error;
mod http_client;
mod operation;
mod params;
pub mod responses;
mod traits;
mod types;
mod utils;

pub use client::ManagementClient;
pub use error::{ApiError, Result};
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, HttpInvoker, HttpInvokerBuilder,
};
pub use operation::{NULL_ENTITY_KEY_QUIRK, Operation};
pub use params::{ParamValue, RequestParams, encode_component};
pub use traits::RemoteInvoker;
pub use types::{
    Configuration, DEFAULT_PAGE_SIZE, HypervisorCapability, HypervisorCapabilityFilter,
    LdapConfiguration, ListPage, MAX_PAGE_SIZE, PaginationParams, Row, USAGE_CATEGORY, to_row,
};
pub use utils::log_sanitizer;
