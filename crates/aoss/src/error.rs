//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a per-class exit code.

use miette::Diagnostic;
use thiserror::Error;

use aoss_config::ConfigError;
use aoss_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const REJECTED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to switch at {url}")]
    #[diagnostic(
        code(aoss::connection_failed),
        help(
            "{reason}\n\
             Check the address and that REST is enabled on the switch \
             (`rest-interface`, `web-management plaintext|ssl`)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(aoss::timeout),
        help("Increase the timeout with --timeout or check switch responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(aoss::auth_failed),
        help(
            "{message}\n\
             The user needs manager rights. Update the stored password with: \
             aoss config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(aoss::no_credentials),
        help(
            "Pass --password, set AOSS_PASSWORD, or store one with: \
             aoss config set-password --profile {profile}"
        )
    )]
    NoCredentials { profile: String },

    // ── Operations ───────────────────────────────────────────────────
    #[error("VLAN allocation failed{}", vlan_suffix(.vlan_id))]
    #[diagnostic(code(aoss::allocation), help("{message}"))]
    Allocation {
        vlan_id: Option<u16>,
        message: String,
    },

    #[error("No free VLAN ID left in 1..={max}")]
    #[diagnostic(
        code(aoss::vlan_exhausted),
        help("Remove unused VLANs or pass an explicit --id.")
    )]
    NoFreeVlan { max: u16 },

    #[error("Tagging VLAN {vlan_id} onto uplinks failed")]
    #[diagnostic(
        code(aoss::tagging),
        help(
            "{message}\n\
             Already tagged (left in place): {tagged}"
        )
    )]
    Tagging {
        vlan_id: u16,
        message: String,
        tagged: String,
    },

    #[error("PoE {action} on port {port} failed")]
    #[diagnostic(code(aoss::poe), help("{message}"))]
    Poe {
        action: &'static str,
        port: String,
        message: String,
    },

    #[error("Switch rejected the request")]
    #[diagnostic(code(aoss::rejected), help("{message}"))]
    Rejected { message: String },

    #[error("Switch session was already closed")]
    #[diagnostic(code(aoss::session_closed))]
    SessionClosed,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(aoss::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(aoss::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: aoss config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No switch configured")]
    #[diagnostic(
        code(aoss::no_switch),
        help(
            "Pass --switch <address>, set AOSS_SWITCH, or create a profile with: \
             aoss config init\n\
             Config file: {path}"
        )
    )]
    NoSwitch { path: String },

    #[error(transparent)]
    #[diagnostic(code(aoss::config))]
    Config(ConfigError),

    #[error("Internal error: {0}")]
    #[diagnostic(code(aoss::internal))]
    Internal(String),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[allow(clippy::ref_option)]
fn vlan_suffix(vlan_id: &Option<u16>) -> String {
    vlan_id.map(|id| format!(" for VLAN {id}")).unwrap_or_default()
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Allocation { .. }
            | Self::NoFreeVlan { .. }
            | Self::Tagging { .. }
            | Self::Poe { .. }
            | Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } | Self::NoSwitch { .. } | Self::ProfileNotFound { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::SessionClosed => CliError::SessionClosed,

            CoreError::Allocation { vlan_id, message } => CliError::Allocation { vlan_id, message },

            CoreError::NoFreeVlan { max } => CliError::NoFreeVlan { max },

            CoreError::Tagging {
                vlan_id,
                port,
                message,
                tagged,
            } => CliError::Tagging {
                vlan_id,
                message: match port {
                    Some(port) => format!("port {port}: {message}"),
                    None => message,
                },
                tagged: if tagged.is_empty() {
                    "(none)".into()
                } else {
                    tagged.join(", ")
                },
            },

            CoreError::Query { port, message } => CliError::Poe {
                action: "query",
                port,
                message,
            },

            CoreError::Command { port, message } => CliError::Poe {
                action: "command",
                port,
                message,
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api { message, .. } => CliError::Rejected { message },

            CoreError::Config { message } => CliError::Validation {
                field: "switch".into(),
                reason: message,
            },

            CoreError::SessionTeardown { message } | CoreError::Internal(message) => {
                CliError::Internal(message)
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}
