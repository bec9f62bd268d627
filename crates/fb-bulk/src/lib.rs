//! # forcebridge-bulk
//!
//! Asynchronous batch-job lifecycle for the forcebridge CRM client.
//!
//! A [`Job`] is declared against a target object, batches of work are
//! submitted to it, and results are fetched once batches complete:
//!
//! ```text
//! create_job ──► add_batch ──► (platform processes) ──► get_batch_results
//!      │
//!      └──► close_job / abort_job   (verified against the returned state)
//! ```
//!
//! Job and batch parameters accept either a materialized entity or a bare id
//! string; resolution is pure, and a network fetch happens only when the
//! returned entity must carry a fully-populated back-reference.

mod client;
mod refs;
mod types;

pub use client::BulkClient;
pub use refs::{BatchRef, JobRef};
pub use types::{
    BatchInfo, BatchResult, BatchState, CreateJobRequest, Job, JobOperation, JobState,
};

// The dispatch layer normalizes every failure into one error type; this crate
// adds no kinds of its own.
pub use forcebridge_client::{Error, ErrorKind, Result};
