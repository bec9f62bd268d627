//! # forcebridge-client
//!
//! Core dispatch layer for the forcebridge CRM client.
//!
//! This crate provides everything the API-surface crates (forcebridge-rest,
//! forcebridge-bulk) are built on:
//! - Session acquisition via the OAuth2 password grant and token lifecycle
//! - A uniform request-building pipeline shared by every operation
//! - Response classification that normalizes every failure into one error type
//! - Configurable decode shape for dynamically-typed payloads
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │            (forcebridge-rest, forcebridge-bulk)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                              │
//! │  - Holds the Session behind a shared read-mostly lock       │
//! │  - login() populates the Session atomically                 │
//! │  - request_rest()/request_batch() inject credentials        │
//! │  - execute() builds, sends, and classifies every exchange   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  reqwest + classifier                       │
//! │  - One blocking round trip per call, no internal retry      │
//! │  - Status/body classification into payload or Error         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security
//!
//! Credentials are redacted in Debug output and skipped in tracing spans.

mod client;
mod config;
mod error;
mod payload;
mod request;
mod response;
mod session;

pub use client::{Client, Headers};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use payload::{DecodeMode, Payload};
pub use request::RequestMethod;
pub use session::Session;

/// Default API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "62.0";

/// Default login endpoint origin.
pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("forcebridge/", env!("CARGO_PKG_VERSION"));
