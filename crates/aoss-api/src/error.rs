use thiserror::Error;

/// Top-level error type for the `aoss-api` crate.
///
/// Covers every failure mode of a switch session: login, transport,
/// unexpected HTTP statuses, and logout. `aoss-core` maps these into
/// operation-specific errors (allocation, tagging, PoE).
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected, or the login response carried no session cookie.
    #[error("Authentication failed: {message}")]
    Authentication { status: Option<u16>, message: String },

    /// The session was logged out and can no longer issue requests.
    #[error("Session is closed -- log in again to issue requests")]
    SessionClosed,

    /// Logout was answered with something other than HTTP 204.
    #[error("Logout failed (HTTP {status})")]
    Logout { status: u16, body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// The switch answered with a status other than the one the endpoint
    /// documents as success.
    #[error("{method} {path}: expected HTTP {expected}, got {status}")]
    UnexpectedStatus {
        method: String,
        path: String,
        expected: u16,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status attached to this error, if the switch answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => *status,
            Self::Logout { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// A short excerpt of the response body, for log lines and diagnostics.
    pub fn body_preview(&self) -> Option<&str> {
        match self {
            Self::Logout { body, .. }
            | Self::UnexpectedStatus { body, .. }
            | Self::Deserialization { body, .. } => Some(preview(body)),
            _ => None,
        }
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. } | Self::Tls(_))
    }
}

/// Truncate a response body to at most 200 bytes on a char boundary.
pub(crate) fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.get(..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(150);
        let p = preview(&body);
        assert!(p.len() <= 200);
        assert!(body.starts_with(p));
    }

    #[test]
    fn unexpected_status_exposes_status_and_body() {
        let err = Error::UnexpectedStatus {
            method: "POST".into(),
            path: "/vlans".into(),
            expected: 201,
            status: 400,
            body: "{\"message\":\"duplicate name\"}".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body_preview(), Some("{\"message\":\"duplicate name\"}"));
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "POST /vlans: expected HTTP 201, got 400"
        );
    }
}
