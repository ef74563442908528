// ── Core error types ──
//
// User-facing errors from aoss-core, one class per high-level operation.
// Transport and session failures keep their own classes; a status the
// switch rejects becomes the error of the operation that issued it.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Cannot connect to switch at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Switch request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Switch session is closed")]
    SessionClosed,

    #[error("Logout failed: {message}")]
    SessionTeardown { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("VLAN allocation failed: {message}")]
    Allocation {
        vlan_id: Option<u16>,
        message: String,
    },

    #[error("No free VLAN ID left in 1..={max}")]
    NoFreeVlan { max: u16 },

    /// Tagging stopped at `port`. Ports in `tagged` already carry the VLAN;
    /// they are left in place.
    #[error("Tagging VLAN {vlan_id} failed{}: {message}", on_port(.port))]
    Tagging {
        vlan_id: u16,
        port: Option<String>,
        message: String,
        tagged: Vec<String>,
    },

    #[error("Reading PoE state of port {port} failed: {message}")]
    Query { port: String, message: String },

    #[error("Setting PoE on port {port} failed: {message}")]
    Command { port: String, message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Ports that were tagged before a tagging failure, if any.
    pub fn partially_tagged(&self) -> &[String] {
        match self {
            Self::Tagging { tagged, .. } => tagged,
            _ => &[],
        }
    }
}

#[allow(clippy::ref_option)]
fn on_port(port: &Option<String>) -> String {
    port.as_deref()
        .map(|p| format!(" on port {p}"))
        .unwrap_or_default()
}

/// Describe a rejected API call: the status line plus a body excerpt.
pub(crate) fn describe(err: &aoss_api::Error) -> String {
    match err.body_preview() {
        Some(body) if !body.trim().is_empty() => format!("{err}: {}", body.trim()),
        _ => err.to_string(),
    }
}

/// Map an API error into the calling operation's error class.
///
/// Transport, timeout and session failures keep their generic class;
/// anything the switch answered (a rejected status, an unreadable body)
/// is handed to `op` with a description.
pub(crate) fn rejected(
    err: aoss_api::Error,
    op: impl FnOnce(String) -> CoreError,
) -> CoreError {
    match err {
        aoss_api::Error::UnexpectedStatus { .. }
        | aoss_api::Error::Deserialization { .. }
        | aoss_api::Error::Serialization(_) => op(describe(&err)),
        other => other.into(),
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<aoss_api::Error> for CoreError {
    fn from(err: aoss_api::Error) -> Self {
        match err {
            aoss_api::Error::Authentication { message, .. } => {
                CoreError::AuthenticationFailed { message }
            }
            aoss_api::Error::SessionClosed => CoreError::SessionClosed,
            aoss_api::Error::Logout { status, ref body } => CoreError::SessionTeardown {
                message: format!("HTTP {status}: {}", body.trim()),
            },
            aoss_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            aoss_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            aoss_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            aoss_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            aoss_api::Error::UnexpectedStatus { status, .. } => CoreError::Api {
                message: describe(&err),
                status: Some(status),
            },
            aoss_api::Error::Serialization(e) => CoreError::Internal(format!(
                "Serialization error: {e}"
            )),
            aoss_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
