//! # forcebridge
//!
//! A Salesforce-style CRM API client library for Rust.
//!
//! This library provides authenticated access to a CRM platform's REST and
//! asynchronous batch APIs: OAuth2 password-grant login, CRUD/query
//! operations on typed objects, and the multi-step batch-job lifecycle
//! (create job → submit batches → close → fetch results).
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//!
//! ## Crates
//!
//! - **forcebridge-client** - Dispatch layer: session lifecycle, request
//!   pipeline, error classification
//! - **forcebridge-rest** - Object operations: CRUD, upsert, metadata, search
//! - **forcebridge-bulk** - Asynchronous batch jobs: Job/BatchInfo/BatchResult
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forcebridge::{BulkClient, ClientConfig, JobOperation, RestClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcebridge::Error> {
//!     let config = ClientConfig::new("consumer_key", "consumer_secret");
//!     let rest = RestClient::new(config)?;
//!     rest.inner().login("user@example.com", "password", "security_token").await?;
//!
//!     // One-off record operations
//!     let created = rest.create("Account", &json!({"Name": "Acme"})).await?;
//!
//!     // Bulk work shares the same session
//!     let bulk = BulkClient::from_client(rest.inner().clone());
//!     let job = bulk.create_job(JobOperation::Insert, "Account", "JSON", None).await?;
//!     let batch = bulk.add_batch(&job, &json!([{"Name": "Acme"}])).await?;
//!     bulk.close_job(&job).await?;
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use forcebridge_bulk as bulk;
pub use forcebridge_client as client;
pub use forcebridge_rest as rest;

// Re-export commonly used types at the top level
pub use forcebridge_bulk::{BulkClient, JobOperation, JobState};
pub use forcebridge_client::{Client, ClientConfig, DecodeMode, Error, ErrorKind, Result};
pub use forcebridge_rest::RestClient;
