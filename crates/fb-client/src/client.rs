//! The dispatch client: session lifecycle, authenticated request routing,
//! and the password-grant login exchange.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::payload::Payload;
use crate::request::{value_to_pairs, RequestMethod};
use crate::response::classify;
use crate::session::Session;

/// Per-call extra headers, merged over the dispatcher's base header set.
/// Caller-supplied entries win on key collision (keys compare
/// case-insensitively).
pub type Headers = HashMap<String, String>;

/// Header key carrying the bearer credential on REST calls.
const AUTHORIZATION: &str = "authorization";

/// Header key carrying the session credential on async batch calls; the
/// platform requires this alternate form for its asynchronous API.
const SESSION_HEADER: &str = "x-sfdc-session";

/// Dispatch client for the CRM platform's REST and async batch APIs.
///
/// Every operation in the API-surface crates routes through [`Client::execute`],
/// which builds one HTTP exchange, hands the raw response to the classifier,
/// and records the body for diagnostic inspection.
///
/// Clones share the same session and diagnostics, so a login performed on any
/// handle is visible to all of them. The session is written only by a
/// successful [`Client::login`]; treat login as a barrier operation and do not
/// run it concurrently with in-flight authenticated calls.
///
/// The client performs no caching and no automatic retry; every failure
/// surfaces immediately to the caller.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<RwLock<Session>>,
    last_response: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("session", &self.read_session())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client with an empty session.
    pub fn new(config: ClientConfig) -> Result<Self> {
        url::Url::parse(&config.login_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        let session = Session::new(&config.login_url, &config.api_version);
        Ok(Self {
            http,
            config,
            session: Arc::new(RwLock::new(session)),
            last_response: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client around an already-issued credential, skipping login.
    pub fn with_credential(
        config: ClientConfig,
        instance_url: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self> {
        let client = Self::new(config)?;
        let session = Session::authenticated(
            &instance_url.into(),
            &credential.into(),
            &client.config.api_version,
        );
        *client.write_session() = session;
        Ok(client)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the current session state.
    pub fn session(&self) -> Session {
        self.read_session().clone()
    }

    /// Returns true once a login has populated the session.
    pub fn is_authenticated(&self) -> bool {
        self.read_session().is_authenticated()
    }

    /// The raw body of the most recent completed exchange, for diagnostics.
    pub fn last_response(&self) -> Option<String> {
        self.last_response
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply the configured decode mode to a dispatched value.
    pub fn payload(&self, value: Value) -> Payload {
        Payload::from_value(self.config.decode_mode, value)
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Perform the OAuth2 password-grant login exchange.
    ///
    /// The security token is concatenated onto the password, per the
    /// platform's password-grant contract. On success the session is replaced
    /// atomically (credential plus all derived URLs) and the raw decoded login
    /// payload is returned for inspection. On any failure the session is left
    /// untouched and the call fails with [`ErrorKind::Auth`].
    ///
    /// This is the one call exempt from the credential-presence invariant.
    #[instrument(skip(self, password, security_token))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        security_token: &str,
    ) -> Result<Payload> {
        let url = format!("{}/services/oauth2/token", self.read_session().base_url());
        let params = json!({
            "grant_type": "password",
            "client_id": self.config.consumer_key,
            "client_secret": self.config.consumer_secret(),
            "username": username,
            "password": format!("{}{}", password, security_token),
        });
        let headers = Headers::from([(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        )]);

        let payload = self
            .execute(&url, Some(&params), RequestMethod::Post, headers)
            .await
            .map_err(auth_error)?;

        let access_token = required_login_field(&payload, "access_token")?;
        let instance_url = required_login_field(&payload, "instance_url")?;
        let session = Session::authenticated(&instance_url, &access_token, &self.config.api_version);
        *self.write_session() = session;

        info!(instance_url = %instance_url, "login succeeded");
        Ok(self.payload(payload))
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Build and execute a single HTTP exchange.
    ///
    /// `params` is carried as a query string for GET, a JSON body when the
    /// effective Content-Type is JSON, and a form-encoded body otherwise.
    /// The raw response body is stored as the last-response diagnostic before
    /// classification.
    #[instrument(
        skip(self, params, extra_headers),
        fields(method = method.as_str(), url = %url)
    )]
    pub async fn execute(
        &self,
        url: &str,
        params: Option<&Value>,
        method: RequestMethod,
        extra_headers: Headers,
    ) -> Result<Value> {
        let mut headers = Headers::from([(
            "content-type".to_string(),
            "application/json".to_string(),
        )]);
        for (name, value) in extra_headers {
            headers.insert(name.to_ascii_lowercase(), value);
        }
        let json_body = headers
            .get("content-type")
            .is_some_and(|ct| ct.contains("application/json"));

        let mut request = self.http.request(method.to_reqwest(), url);
        match (method, params) {
            (RequestMethod::Get, Some(params)) => {
                request = request.query(&value_to_pairs(params)?);
            }
            (_, Some(params)) if json_body => {
                request = request.body(serde_json::to_string(params)?);
            }
            (_, Some(params)) => {
                request = request.body(serde_urlencoded::to_string(value_to_pairs(params)?)?);
            }
            (_, None) => {}
        }
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if self.config.enable_tracing {
            debug!("sending request");
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        *self
            .last_response
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(body.clone());

        if self.config.enable_tracing {
            debug!(status, bytes = body.len(), "response received");
        }

        classify(status, &body)
    }

    /// Dispatch an authenticated call against the REST base URL.
    ///
    /// Fails fast with [`ErrorKind::NotAuthenticated`] before any transport
    /// call when the session has no credential.
    pub async fn request_rest(
        &self,
        path: &str,
        params: Option<&Value>,
        method: RequestMethod,
        mut extra_headers: Headers,
    ) -> Result<Value> {
        let (url, credential) = {
            let session = self.read_session();
            let credential = session
                .credential()
                .ok_or_else(|| Error::new(ErrorKind::NotAuthenticated))?
                .to_string();
            (format!("{}{}", session.rest_url(), path), credential)
        };
        extra_headers
            .entry(AUTHORIZATION.to_string())
            .or_insert_with(|| format!("Bearer {}", credential));
        self.execute(&url, params, method, extra_headers).await
    }

    /// Dispatch an authenticated call against the async batch base URL,
    /// using the platform's session-style header instead of the bearer form.
    pub async fn request_batch(
        &self,
        path: &str,
        params: Option<&Value>,
        method: RequestMethod,
        mut extra_headers: Headers,
    ) -> Result<Value> {
        let (url, credential) = {
            let session = self.read_session();
            let credential = session
                .credential()
                .ok_or_else(|| Error::new(ErrorKind::NotAuthenticated))?
                .to_string();
            (format!("{}{}", session.batch_url(), path), credential)
        };
        extra_headers
            .entry(SESSION_HEADER.to_string())
            .or_insert(credential);
        self.execute(&url, params, method, extra_headers).await
    }

    fn read_session(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Remap any dispatch failure from the login exchange into an auth error.
fn auth_error(err: Error) -> Error {
    let description = match &err.kind {
        ErrorKind::Api { description, .. } => description.clone(),
        ErrorKind::Transport(message) => message.clone(),
        ErrorKind::Decode(_) => "login response was not valid JSON".to_string(),
        other => other.to_string(),
    };
    Error::with_source(ErrorKind::Auth(description), err)
}

fn required_login_field(payload: &Value, field: &str) -> Result<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::new(ErrorKind::Auth(format!(
                "login response missing {}",
                field
            )))
        })
}
