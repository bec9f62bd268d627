//! REST object-operations client.
//!
//! Wraps a dispatch [`Client`] and provides the per-object convenience
//! methods: CRUD, upsert, metadata, and search.

use forcebridge_client::{Client, ClientConfig, Result};

mod crud;
mod describe;
mod search;

/// REST API client for typed-object operations.
///
/// # Example
///
/// ```rust,ignore
/// use forcebridge_rest::RestClient;
/// use forcebridge_client::ClientConfig;
/// use serde_json::json;
///
/// let client = RestClient::new(ClientConfig::new("consumer_key", "consumer_secret"))?;
/// client.inner().login("user@example.com", "password", "token").await?;
///
/// // Create
/// let created = client.create("Account", &json!({"Name": "Acme"})).await?;
///
/// // Query
/// let accounts = client.search("SELECT Id, Name FROM Account", false, false).await?;
///
/// // Update
/// client.update("Account", "001xx000003DgAAAS", &json!({"Name": "Acme Corp"})).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
}

impl RestClient {
    /// Create a new REST client with an empty session.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }

    /// Create a REST client from an existing dispatch client, sharing its
    /// session.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying dispatch client.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
