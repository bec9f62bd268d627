//! CRUD operations on typed objects.

use serde_json::{json, Value};
use tracing::instrument;

use forcebridge_client::{Headers, Payload, RequestMethod, Result};

impl super::RestClient {
    /// Create a record.
    #[instrument(skip(self, data))]
    pub async fn create(&self, object: &str, data: &Value) -> Result<Payload> {
        let path = format!("sobjects/{}", object);
        let value = self
            .inner()
            .request_rest(&path, Some(data), RequestMethod::Post, Headers::new())
            .await?;
        Ok(self.inner().payload(value))
    }

    /// Upsert by external id.
    ///
    /// `path` is expected to already encode `object/externalField/externalValue`.
    #[instrument(skip(self, data))]
    pub async fn upsert(&self, path: &str, data: &Value) -> Result<Payload> {
        let path = format!("sobjects/{}", path);
        let value = self
            .inner()
            .request_rest(&path, Some(data), RequestMethod::Patch, Headers::new())
            .await?;
        Ok(self.inner().payload(value))
    }

    /// Update a record by id.
    #[instrument(skip(self, data))]
    pub async fn update(&self, object: &str, id: &str, data: &Value) -> Result<Payload> {
        let path = format!("sobjects/{}/{}", object, id);
        let value = self
            .inner()
            .request_rest(&path, Some(data), RequestMethod::Patch, Headers::new())
            .await?;
        Ok(self.inner().payload(value))
    }

    /// Delete a record by id.
    #[instrument(skip(self))]
    pub async fn delete(&self, object: &str, id: &str) -> Result<Payload> {
        let path = format!("sobjects/{}/{}", object, id);
        let value = self
            .inner()
            .request_rest(&path, None, RequestMethod::Delete, Headers::new())
            .await?;
        Ok(self.inner().payload(value))
    }

    /// Fetch a record by id, optionally restricted to the given fields.
    #[instrument(skip(self))]
    pub async fn get(&self, object: &str, id: &str, fields: Option<&[&str]>) -> Result<Payload> {
        let path = format!("sobjects/{}/{}", object, id);
        let params = fields.map(|fields| json!({"fields": fields.join(",")}));
        let value = self
            .inner()
            .request_rest(&path, params.as_ref(), RequestMethod::Get, Headers::new())
            .await?;
        Ok(self.inner().payload(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::RestClient;
    use forcebridge_client::{Client, ClientConfig};
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RestClient {
        let client =
            Client::with_credential(ClientConfig::default(), server.uri(), "test-token").unwrap();
        RestClient::from_client(client)
    }

    #[tokio::test]
    async fn test_create_posts_json_and_synthesizes_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/sobjects/Account"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_string_contains(r#""Name":"Acme""#))
            .respond_with(ResponseTemplate::new(201))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let payload = client
            .create("Account", &serde_json::json!({"Name": "Acme"}))
            .await
            .expect("create should succeed");

        assert_eq!(payload.get("success"), Some(&serde_json::json!(true)));
    }

    #[tokio::test]
    async fn test_update_patches_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/services/data/v62.0/sobjects/Account/001xx000003DgAAAS"))
            .and(body_string_contains(r#""Name":"Acme Corp""#))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let payload = client
            .update(
                "Account",
                "001xx000003DgAAAS",
                &serde_json::json!({"Name": "Acme Corp"}),
            )
            .await
            .expect("update should succeed");

        assert_eq!(payload.get("success"), Some(&serde_json::json!(true)));
    }

    #[tokio::test]
    async fn test_upsert_uses_pre_encoded_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path(
                "/services/data/v62.0/sobjects/Account/ExternalId__c/ACME-1",
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "001xx000003DgAAAS",
                "success": true,
                "created": true
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let payload = client
            .upsert(
                "Account/ExternalId__c/ACME-1",
                &serde_json::json!({"Name": "Acme"}),
            )
            .await
            .expect("upsert should succeed");

        assert_eq!(payload.get("created"), Some(&serde_json::json!(true)));
    }

    #[tokio::test]
    async fn test_delete_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/services/data/v62.0/sobjects/Account/001xx000003DgAAAS"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let payload = client
            .delete("Account", "001xx000003DgAAAS")
            .await
            .expect("delete should succeed");

        assert_eq!(payload.get("success"), Some(&serde_json::json!(true)));
    }

    #[tokio::test]
    async fn test_get_with_fields_query_param() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Account/001xx000003DgAAAS"))
            .and(query_param("fields", "Id,Name,Industry"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Id": "001xx000003DgAAAS",
                "Name": "Acme",
                "Industry": "Energy"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let payload = client
            .get(
                "Account",
                "001xx000003DgAAAS",
                Some(&["Id", "Name", "Industry"]),
            )
            .await
            .expect("get should succeed");

        assert_eq!(payload.get("Name"), Some(&serde_json::json!("Acme")));
    }
}
