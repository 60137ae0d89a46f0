//! Typed HTTP client for the automation platform REST API.
//!
//! Every resource (scenarios, connections, data stores, custom apps, ...)
//! is reached through a short-lived handle obtained from [`ConveyorClient`].
//! All handles share one transport, credential and retry policy.
//!
//! # Example
//!
//! ```no_run
//! use conveyor_client::{ConveyorClient, Result};
//! use conveyor_client::api::ListScenariosQuery;
//!
//! # async fn example() -> Result<()> {
//! let client = ConveyorClient::builder()
//!     .zone("eu1.example.com")
//!     .token("a1b2c3d4-e5f6-7890-abcd-ef1234567890")
//!     .build()?;
//!
//! let me = client.users().me().await?;
//! println!("Signed in as {}", me["email"]);
//!
//! let scenarios = client
//!     .scenarios()
//!     .list(&ListScenariosQuery {
//!         team_id: Some(1),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{}", scenarios);
//! # Ok(())
//! # }
//! ```
//!
//! # Request pipeline
//!
//! A call passes through the [`Transport`] stages (headers, URL, send,
//! decode). Failed responses are translated into [`ApiError`]; `429` and
//! `5xx` responses are retried according to the client's [`RetryPolicy`].

pub mod api;
pub mod auth;
pub mod client;
pub mod encode;
pub mod error;
pub mod request;
pub mod retry;
pub mod testing;
pub mod transport;
pub mod types;

pub use auth::{AuthScheme, Credential};
pub use client::{ClientBuilder, ConveyorClient, DEFAULT_API_VERSION};
pub use encode::{Query, QueryValue, encode_query};
pub use error::{ApiError, Error, Result};
pub use request::{Body, RequestOptions};
pub use retry::RetryPolicy;
pub use transport::{
    Endpoint, HeaderContext, HttpRequest, HttpResponse, Protocol, ReqwestTransport, Transport,
};
pub use types::{Pagination, SortDir, pick};

// Re-export API types that are commonly used with list methods
pub use api::{ListOptions, ListScenariosQuery};
