//! Client library for the Congress.gov v3 API.
//!
//! Every lookup — bills, members, committees, nominations, hearings — flows
//! through one resilient request engine: query construction with injected
//! credentials, bounded retry with exponential backoff on 429/5xx, response
//! normalization into a uniform [`Envelope`], and a single error
//! classification point producing [`CongressApiError`] values callers can
//! branch on by kind.
//!
//! ```no_run
//! use congress_client::{ClientConfig, CongressClient, resources::ListQuery};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ClientConfig::new(std::env::var("CONGRESS_API_KEY")?)?;
//! let client = CongressClient::new(config)?;
//!
//! let query = ListQuery { limit: Some(20), ..Default::default() };
//! let mut page = client.list_bills(&query).await?;
//! while let Some(next) = client.fetch_next(&page).await {
//!     page = next?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;

pub use client::{ApiResult, CongressClient};
pub use config::ClientConfig;
pub use error::{CongressApiError, ErrorKind};
pub use http::{Envelope, PaginationInfo, RequestDescriptor, RetryPolicy};
