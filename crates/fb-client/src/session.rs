//! Session state for a client instance.
//!
//! A `Session` holds the bearer credential and the three base URLs every
//! dispatch routes through. It starts empty at client construction and is
//! replaced wholesale by a successful login; a failed login never touches it.

/// Authenticated-session state: credential plus derived base URLs.
///
/// The credential is redacted in Debug output to prevent accidental
/// exposure in logs.
#[derive(Clone)]
pub struct Session {
    credential: Option<String>,
    base_url: String,
    rest_url: String,
    batch_url: String,
    api_version: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field(
                "credential",
                &self.credential.as_ref().map(|_| "[REDACTED]"),
            )
            .field("base_url", &self.base_url)
            .field("rest_url", &self.rest_url)
            .field("batch_url", &self.batch_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Session {
    /// Create an empty (unauthenticated) session rooted at the login URL.
    pub fn new(base_url: &str, api_version: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            credential: None,
            base_url: base.to_string(),
            rest_url: rest_url_for(base, api_version),
            batch_url: batch_url_for(base, api_version),
            api_version: api_version.to_string(),
        }
    }

    /// Create a fully-populated session from a login response.
    ///
    /// All URLs are recomputed from the instance URL in one step so the
    /// session is never observable in a partially-updated state.
    pub fn authenticated(instance_url: &str, credential: &str, api_version: &str) -> Self {
        let base = instance_url.trim_end_matches('/');
        Self {
            credential: Some(credential.to_string()),
            base_url: base.to_string(),
            rest_url: rest_url_for(base, api_version),
            batch_url: batch_url_for(base, api_version),
            api_version: api_version.to_string(),
        }
    }

    /// The bearer credential, if a login has succeeded.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Returns true once a login has populated the session.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// The login (or instance) origin.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The versioned REST data URL, with trailing slash.
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// The async job base URL (paths are appended directly, no trailing slash).
    pub fn batch_url(&self) -> &str {
        &self.batch_url
    }

    /// The configured API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }
}

fn rest_url_for(base: &str, api_version: &str) -> String {
    format!("{}/services/data/v{}/", base, api_version)
}

fn batch_url_for(base: &str, api_version: &str) -> String {
    format!("{}/services/async/{}/job", base, api_version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session() {
        let session = Session::new("https://login.salesforce.com", "62.0");
        assert!(!session.is_authenticated());
        assert!(session.credential().is_none());
        assert_eq!(session.base_url(), "https://login.salesforce.com");
        assert_eq!(
            session.rest_url(),
            "https://login.salesforce.com/services/data/v62.0/"
        );
        assert_eq!(
            session.batch_url(),
            "https://login.salesforce.com/services/async/62.0/job"
        );
    }

    #[test]
    fn test_authenticated_session_recomputes_urls() {
        let session = Session::authenticated("https://na1.salesforce.com", "token123", "62.0");
        assert!(session.is_authenticated());
        assert_eq!(session.credential(), Some("token123"));
        assert_eq!(
            session.rest_url(),
            "https://na1.salesforce.com/services/data/v62.0/"
        );
        assert_eq!(
            session.batch_url(),
            "https://na1.salesforce.com/services/async/62.0/job"
        );
    }

    #[test]
    fn test_trailing_slash_handling() {
        let session = Session::authenticated("https://na1.salesforce.com/", "token", "60.0");
        assert_eq!(session.base_url(), "https://na1.salesforce.com");
        assert_eq!(
            session.rest_url(),
            "https://na1.salesforce.com/services/data/v60.0/"
        );
    }

    #[test]
    fn test_debug_redacts_credential() {
        let session = Session::authenticated("https://na1.salesforce.com", "super_secret", "62.0");
        let debug_output = format!("{:?}", session);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret"));
    }
}
