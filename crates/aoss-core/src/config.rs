// ── Runtime connection configuration ──
//
// These types describe *how* to reach one switch. They carry credential
// data and connection tuning, but never touch disk. The CLI constructs a
// `SwitchConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use aoss_api::transport::{DEFAULT_REQUEST_INTERVAL, DEFAULT_TIMEOUT};
use aoss_api::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;

/// REST schema version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v6";

/// Scheme of the switch's web management interface.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Protocol {
    /// `web-management plaintext`
    #[default]
    Http,
    /// `web-management ssl`
    Https,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (factory self-signed certificates).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single switch.
#[derive(Debug, Clone)]
pub struct SwitchConfig {
    /// Switch IP or DNS name, optionally with `:port`.
    pub host: String,
    pub protocol: Protocol,
    /// REST schema version segment, e.g. `v6`.
    pub api_version: String,
    /// User with manager privileges.
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Minimum gap between consecutive requests.
    pub request_interval: Duration,
}

impl SwitchConfig {
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            host: host.into(),
            protocol: Protocol::default(),
            api_version: DEFAULT_API_VERSION.into(),
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            request_interval: DEFAULT_REQUEST_INTERVAL,
        }
    }

    /// `{protocol}://{host}/rest/{api_version}`
    pub fn base_url(&self) -> Result<Url, CoreError> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(CoreError::Config {
                message: "switch address is empty".into(),
            });
        }
        if host.contains("://") {
            return Err(CoreError::Config {
                message: format!(
                    "switch address '{host}' must not contain a scheme; use --protocol instead"
                ),
            });
        }
        let version = self.api_version.trim_matches('/');
        Url::parse(&format!("{}://{host}/rest/{version}", self.protocol)).map_err(|e| {
            CoreError::Config {
                message: format!("invalid switch address '{host}': {e}"),
            }
        })
    }

    /// Transport settings for the session's HTTP client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            min_request_interval: self.request_interval,
            cookie_jar: None,
        }
    }
}
