//! # forcebridge-rest
//!
//! Object operations for the forcebridge CRM client.
//!
//! Every operation here is a thin parameterization of the dispatch layer in
//! `forcebridge-client`: one authenticated REST call with a fixed path,
//! method, and body mapping. All state and policy (session, classification,
//! decode shape) lives in the dispatcher.

mod client;

pub use client::RestClient;

// The dispatch layer normalizes every failure into one error type; this crate
// adds no kinds of its own.
pub use forcebridge_client::{Error, ErrorKind, Result};
