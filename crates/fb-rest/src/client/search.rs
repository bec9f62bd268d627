//! Query and search operations.

use serde_json::json;
use tracing::instrument;

use forcebridge_client::{Headers, Payload, RequestMethod, Result};

impl super::RestClient {
    /// Run a query against the platform's query language.
    ///
    /// `all` routes to the endpoint that includes archived and deleted
    /// records. With `explain` set, the platform returns the query plan
    /// instead of records (the query is sent as the `explain` parameter in
    /// place of `q`).
    #[instrument(skip(self, query))]
    pub async fn search(&self, query: &str, all: bool, explain: bool) -> Result<Payload> {
        let path = if all { "queryAll/" } else { "query/" };
        let params = if explain {
            json!({"explain": query})
        } else {
            json!({"q": query})
        };

        let value = self
            .inner()
            .request_rest(path, Some(&params), RequestMethod::Get, Headers::new())
            .await?;
        Ok(self.inner().payload(value))
    }
}
