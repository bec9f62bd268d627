//! Object listing and metadata operations.

use chrono::{DateTime, Utc};
use tracing::instrument;

use forcebridge_client::{Error, ErrorKind, Headers, Payload, RequestMethod, Result};

impl super::RestClient {
    /// List every object visible to the session.
    #[instrument(skip(self))]
    pub async fn get_all_objects(&self) -> Result<Payload> {
        let value = self
            .inner()
            .request_rest("sobjects/", None, RequestMethod::Get, Headers::new())
            .await?;
        Ok(self.inner().payload(value))
    }

    /// Fetch metadata for one object.
    ///
    /// With `all` set, the full describe document is requested instead of the
    /// basic metadata. `since` (RFC 3339 or RFC 2822) is sent as an
    /// `If-Modified-Since` header; an unchanged object comes back as the
    /// classifier's fixed not-modified payload. A `since` value that does not
    /// parse as a date fails before any transport call.
    #[instrument(skip(self))]
    pub async fn get_object_metadata(
        &self,
        object: &str,
        all: bool,
        since: Option<&str>,
    ) -> Result<Payload> {
        let mut headers = Headers::new();
        if let Some(since) = since {
            headers.insert("If-Modified-Since".to_string(), http_date(since)?);
        }

        let path = if all {
            format!("sobjects/{}/describe/", object)
        } else {
            format!("sobjects/{}", object)
        };

        let value = self
            .inner()
            .request_rest(&path, None, RequestMethod::Get, headers)
            .await?;
        Ok(self.inner().payload(value))
    }
}

/// Render a caller-supplied timestamp as an HTTP date.
fn http_date(since: &str) -> Result<String> {
    let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(since)
        .or_else(|_| DateTime::parse_from_rfc2822(since))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidArgument(format!("'{}' is not a valid date", since)),
                e,
            )
        })?;
    Ok(parsed.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}
