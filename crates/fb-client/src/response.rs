//! Response classification shared by every dispatch call.
//!
//! The classifier turns a raw HTTP status and body into either a decoded
//! payload or an [`ErrorKind::Api`] failure. Empty bodies on success statuses
//! are synthesized into fixed payloads so callers never have to special-case
//! them, and a non-success status never silently succeeds.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Error, ErrorKind, Result};

/// Statuses whose empty body means plain success.
const EMPTY_SUCCESS_STATUSES: [u16; 4] = [200, 201, 204, 300];

/// Classify a completed exchange into a payload or an error.
pub(crate) fn classify(status: u16, body: &str) -> Result<Value> {
    if status == 304 && body.is_empty() {
        return Ok(json!({"message": "not changed since specified time"}));
    }

    if EMPTY_SUCCESS_STATUSES.contains(&status) {
        if body.is_empty() {
            return Ok(json!({"success": true}));
        }
        return serde_json::from_str(body).map_err(Into::into);
    }

    Err(Error::new(ErrorKind::Api {
        description: error_description(status, body),
        status,
        raw_body: body.to_string(),
    }))
}

/// Platform error body in the OAuth style: `{"error", "error_description"}`.
#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Platform error body in the REST style: `[{"errorCode", "message"}]`.
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    #[serde(alias = "errorCode")]
    error_code: Option<String>,
    message: String,
}

/// Extract a human-readable description from an error response body.
///
/// Prefers the platform's `error_description`/`error` fields, then the
/// `[{errorCode, message}]` array form, and falls back to the raw body.
fn error_description(status: u16, body: &str) -> String {
    if body.is_empty() {
        return format!("HTTP {}", status);
    }

    if let Ok(err) = serde_json::from_str::<OAuthErrorBody>(body) {
        match (err.error, err.error_description) {
            (Some(error), Some(description)) => {
                return format!("{} - {}", error, description);
            }
            (_, Some(description)) => return description,
            (Some(error), None) => return error,
            (None, None) => {}
        }
    }

    if let Ok(errors) = serde_json::from_str::<Vec<RestErrorBody>>(body) {
        if let Some(err) = errors.into_iter().next() {
            return match err.error_code {
                Some(code) => format!("{}: {}", code, err.message),
                None => err.message,
            };
        }
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_modified_synthesized() {
        let payload = classify(304, "").unwrap();
        assert_eq!(
            payload,
            json!({"message": "not changed since specified time"})
        );
    }

    #[test]
    fn test_empty_success_synthesized() {
        for status in [200, 201, 204, 300] {
            let payload = classify(status, "").unwrap();
            assert_eq!(payload, json!({"success": true}), "status {status}");
        }
    }

    #[test]
    fn test_success_body_decoded() {
        let payload = classify(200, r#"{"id": "001xx", "success": true}"#).unwrap();
        assert_eq!(payload["id"], "001xx");
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let err = classify(200, "{not json").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Decode(_)));
    }

    #[test]
    fn test_oauth_error_body() {
        let body = r#"{"error": "invalid_grant", "error_description": "authentication failure"}"#;
        let err = classify(400, body).unwrap_err();
        match err.kind {
            ErrorKind::Api {
                description,
                status,
                raw_body,
            } => {
                assert_eq!(description, "invalid_grant - authentication failure");
                assert_eq!(status, 400);
                assert_eq!(raw_body, body);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_rest_error_array_body() {
        let body = r#"[{"errorCode": "INVALID_FIELD", "message": "No such column 'foo'"}]"#;
        let err = classify(400, body).unwrap_err();
        match err.kind {
            ErrorKind::Api { description, .. } => {
                assert_eq!(description, "INVALID_FIELD: No such column 'foo'");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_raw() {
        let err = classify(500, "everything is on fire").unwrap_err();
        match err.kind {
            ErrorKind::Api { description, .. } => {
                assert_eq!(description, "everything is on fire");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_error_body_never_succeeds() {
        let err = classify(404, "").unwrap_err();
        match err.kind {
            ErrorKind::Api {
                description,
                status,
                raw_body,
            } => {
                assert_eq!(description, "HTTP 404");
                assert_eq!(status, 404);
                assert!(raw_body.is_empty());
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_not_modified_with_body_is_error() {
        let err = classify(304, "unexpected").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Api { status: 304, .. }));
    }
}
