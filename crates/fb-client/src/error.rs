//! The unified error type shared by every forcebridge crate.
//!
//! Every operation either returns a decoded payload or fails with one of the
//! kinds below; no operation signals failure through a sentinel value, and no
//! error is downgraded to a log line.

/// Result type alias for forcebridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcebridge operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    /// Returns true if the login exchange failed.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Auth(_))
    }

    /// Returns true if the call was rejected for lack of a session credential.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self.kind, ErrorKind::NotAuthenticated)
    }

    /// Returns the HTTP status code if the platform rejected the request.
    pub fn api_status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Network-level failure (connect, timeout, TLS). Never retried internally.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The login exchange failed or returned unusable data.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// An authenticated call was attempted before a successful login.
    #[error("Not authenticated: the session has no credential")]
    NotAuthenticated,

    /// The platform rejected the request.
    #[error("API error: {description} (HTTP {status})")]
    Api {
        description: String,
        status: u16,
        raw_body: String,
    },

    /// Caller passed a malformed argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A job or batch reference could not be resolved to an id.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A close/abort request did not produce the expected job state.
    #[error("State transition failed: expected {expected}, platform returned {actual}")]
    StateTransition { expected: String, actual: String },

    /// A success response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        Error::with_source(ErrorKind::Transport(message), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Decode(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::InvalidArgument(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (
                ErrorKind::Transport("connection refused".into()),
                "Transport error: connection refused",
            ),
            (
                ErrorKind::Auth("invalid_grant - authentication failure".into()),
                "Authentication failed: invalid_grant",
            ),
            (ErrorKind::NotAuthenticated, "no credential"),
            (
                ErrorKind::Api {
                    description: "INVALID_FIELD: No such column 'foo'".into(),
                    status: 400,
                    raw_body: "[]".into(),
                },
                "API error: INVALID_FIELD: No such column 'foo' (HTTP 400)",
            ),
            (
                ErrorKind::InvalidArgument("not a date".into()),
                "Invalid argument: not a date",
            ),
            (
                ErrorKind::InvalidReference("empty job id".into()),
                "Invalid reference: empty job id",
            ),
            (
                ErrorKind::StateTransition {
                    expected: "Closed".into(),
                    actual: "Failed".into(),
                },
                "expected Closed, platform returned Failed",
            ),
            (
                ErrorKind::Decode("unexpected EOF".into()),
                "Decode error: unexpected EOF",
            ),
            (
                ErrorKind::Config("missing consumer key".into()),
                "Configuration error: missing consumer key",
            ),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_error_predicates() {
        let err = Error::new(ErrorKind::NotAuthenticated);
        assert!(err.is_not_authenticated());
        assert!(!err.is_auth_error());

        let err = Error::new(ErrorKind::Auth("bad credentials".into()));
        assert!(err.is_auth_error());
        assert!(!err.is_transport());

        let err = Error::new(ErrorKind::Api {
            description: "gone".into(),
            status: 404,
            raw_body: String::new(),
        });
        assert_eq!(err.api_status(), Some(404));
        assert_eq!(Error::new(ErrorKind::NotAuthenticated).api_status(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Decode(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::other("disk full");
        let err = Error::with_source(ErrorKind::Transport("write failed".into()), source_err);

        assert!(err.source.is_some());
        assert_eq!(err.to_string(), "Transport error: write failed");
    }
}
