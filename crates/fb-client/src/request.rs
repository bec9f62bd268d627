//! Request building helpers for the dispatcher.

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// The verb name, for tracing.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }
}

/// Flatten a JSON object of parameters into string pairs for query strings
/// and form-encoded bodies.
///
/// String values pass through unquoted; other scalars use their JSON
/// rendering; null values are skipped.
pub(crate) fn value_to_pairs(params: &Value) -> Result<Vec<(String, String)>> {
    let object = params.as_object().ok_or_else(|| {
        Error::new(ErrorKind::InvalidArgument(
            "request parameters must be a JSON object".to_string(),
        ))
    })?;

    let mut pairs = Vec::with_capacity(object.len());
    for (name, value) in object {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        pairs.push((name.clone(), rendered));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_mapping() {
        assert_eq!(RequestMethod::Get.to_reqwest(), reqwest::Method::GET);
        assert_eq!(RequestMethod::Patch.to_reqwest(), reqwest::Method::PATCH);
        assert_eq!(RequestMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_value_to_pairs_strings_unquoted() {
        let pairs = value_to_pairs(&json!({"q": "SELECT Id FROM Account"})).unwrap();
        assert_eq!(pairs, vec![("q".to_string(), "SELECT Id FROM Account".to_string())]);
    }

    #[test]
    fn test_value_to_pairs_scalars_and_nulls() {
        let pairs = value_to_pairs(&json!({"limit": 10, "all": true, "skip": null})).unwrap();
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
        assert!(pairs.contains(&("all".to_string(), "true".to_string())));
        assert!(!pairs.iter().any(|(name, _)| name == "skip"));
    }

    #[test]
    fn test_value_to_pairs_rejects_non_objects() {
        let err = value_to_pairs(&json!([1, 2])).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
    }
}
