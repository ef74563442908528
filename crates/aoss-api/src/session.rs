// Switch REST session
//
// Wraps `reqwest::Client` with AOS-S URL construction, cookie-session
// login/logout, request pacing, and the generic `call` primitive every
// endpoint helper goes through. Requests are strictly sequential: the
// pacer lock is held for the whole round trip.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, preview};
use crate::models::LoginSession;
use crate::pacing::Pacer;
use crate::transport::TransportConfig;

const LOGIN_SESSIONS_PATH: &str = "/login-sessions";

/// Raw result of a single REST call. The caller decides which status
/// counts as success.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Pass the response through if it carries exactly `expected`.
    pub fn require(self, expected: StatusCode) -> Result<Self, Error> {
        if self.status == expected {
            return Ok(self);
        }
        Err(Error::UnexpectedStatus {
            method: self.method.to_string(),
            path: self.path,
            expected: expected.as_u16(),
            status: self.status.as_u16(),
            body: self.body,
        })
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(&self.body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&self.body)),
            body: self.body.clone(),
        })
    }
}

/// An authenticated session against one switch.
///
/// Created by [`login`](Self::login), ended by [`logout`](Self::logout).
/// Every request made in between carries the session cookie. After logout
/// the session refuses further calls with [`Error::SessionClosed`].
pub struct SwitchSession {
    http: reqwest::Client,
    base_url: Url,
    cookie_jar: Arc<Jar>,
    pacer: Mutex<Pacer>,
    timeout: Duration,
    active: AtomicBool,
}

impl std::fmt::Debug for SwitchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchSession")
            .field("base_url", &self.base_url.as_str())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl SwitchSession {
    /// Log into the switch and return the authenticated session.
    ///
    /// `base_url` is the versioned REST root, e.g. `http://10.0.0.2/rest/v6`.
    /// Success is exactly HTTP 201 with a `cookie` field in the JSON body;
    /// anything else is an [`Error::Authentication`]. No retry.
    pub async fn login(
        base_url: Url,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config
            .cookie_jar
            .clone()
            .unwrap_or_else(|| Arc::new(Jar::default()));
        let http = config.build_client()?;

        let session = Self {
            http,
            base_url,
            cookie_jar,
            pacer: Mutex::new(Pacer::new(config.min_request_interval)),
            timeout: config.timeout,
            active: AtomicBool::new(false),
        };
        session.authenticate(username, password).await?;
        Ok(session)
    }

    async fn authenticate(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        debug!(base_url = %self.base_url, username, "logging in");

        let body = json!({
            "userName": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .send(Method::POST, LOGIN_SESSIONS_PATH, Some(&body))
            .await?;

        if resp.status != StatusCode::CREATED {
            return Err(Error::Authentication {
                status: Some(resp.status.as_u16()),
                message: format!(
                    "login rejected (HTTP {}): {}",
                    resp.status,
                    preview(&resp.body)
                ),
            });
        }

        let login: LoginSession = resp.json().map_err(|_| Error::Authentication {
            status: Some(resp.status.as_u16()),
            message: "login response carried no session cookie".into(),
        })?;
        if login.cookie.trim().is_empty() {
            return Err(Error::Authentication {
                status: Some(resp.status.as_u16()),
                message: "login response carried an empty session cookie".into(),
            });
        }

        self.cookie_jar.add_cookie_str(&login.cookie, &self.base_url);
        self.active.store(true, Ordering::SeqCst);

        debug!("login successful");
        Ok(())
    }

    /// End the session on the switch.
    ///
    /// Success is exactly HTTP 204. The session is closed whatever the
    /// outcome; logging out a closed session is a no-op.
    pub async fn logout(&self) -> Result<(), Error> {
        if !self.active.swap(false, Ordering::SeqCst) {
            trace!("session already closed, skipping logout");
            return Ok(());
        }

        debug!(base_url = %self.base_url, "logging out");

        let resp = self.send(Method::DELETE, LOGIN_SESSIONS_PATH, None).await?;
        if resp.status != StatusCode::NO_CONTENT {
            return Err(Error::Logout {
                status: resp.status.as_u16(),
                body: resp.body,
            });
        }

        debug!("logout complete");
        Ok(())
    }

    /// Whether the session is logged in.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// The versioned REST root this session talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured pacing interval.
    pub async fn request_interval(&self) -> Duration {
        self.pacer.lock().await.interval()
    }

    /// Issue a request against `base_url + path` with the session cookie.
    ///
    /// Paced, bounded by the transport timeout, never retried. The status
    /// is returned as-is for the caller to interpret.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<ApiResponse, Error> {
        if !self.is_active() {
            return Err(Error::SessionClosed);
        }
        self.send(method, path, payload).await
    }

    /// GET `path`, require `expected`, and deserialize the body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        expected: StatusCode,
    ) -> Result<T, Error> {
        self.call(Method::GET, path, None)
            .await?
            .require(expected)?
            .json()
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Build `{base}{path}`; `path` starts with `/`.
    fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(Error::InvalidUrl)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<ApiResponse, Error> {
        let url = self.url(path)?;

        let mut pacer = self.pacer.lock().await;
        pacer.wait().await;

        debug!("{} {}", method, url);

        let mut builder = self.http.request(method.clone(), url);
        if let Some(body) = payload {
            builder = builder.json(body);
        }

        let outcome = Self::execute(builder).await;
        pacer.finish();
        drop(pacer);

        let (status, body) = outcome.map_err(|e| self.classify(e))?;
        trace!(%status, body_len = body.len(), "response");

        Ok(ApiResponse {
            method,
            path: path.to_owned(),
            status,
            body,
        })
    }

    async fn execute(
        builder: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, String), reqwest::Error> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok((status, body))
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}
