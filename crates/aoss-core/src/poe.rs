// ── PoE control ──

use aoss_api::SwitchSession;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CoreError, rejected};

/// What to do with a port's PoE flag.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PoeAction {
    On,
    Off,
    /// Invert the current state.
    #[default]
    Toggle,
}

impl PoeAction {
    /// Target state given the port's current state.
    pub fn desired(self, current: bool) -> bool {
        match self {
            Self::On => true,
            Self::Off => false,
            Self::Toggle => !current,
        }
    }

    /// Whether the current state has to be read first.
    pub fn needs_current(self) -> bool {
        matches!(self, Self::Toggle)
    }
}

/// Outcome of a PoE change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoeChange {
    pub port: String,
    /// State before the change, when it was read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<bool>,
    pub enabled: bool,
}

fn validate_port(port: &str) -> Result<(), CoreError> {
    if port.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            message: "port ID must not be empty".into(),
        });
    }
    Ok(())
}

/// Current PoE state of `port`.
pub async fn get_poe_enabled(session: &SwitchSession, port: &str) -> Result<bool, CoreError> {
    validate_port(port)?;
    let settings = session.get_poe(port).await.map_err(|e| {
        rejected(e, |message| CoreError::Query {
            port: port.to_owned(),
            message,
        })
    })?;
    debug!(port, enabled = settings.is_poe_enabled, "read PoE state");
    Ok(settings.is_poe_enabled)
}

/// Set PoE on `port` to `enabled` and return the state written.
pub async fn set_poe_enabled(
    session: &SwitchSession,
    port: &str,
    enabled: bool,
) -> Result<bool, CoreError> {
    validate_port(port)?;
    session.set_poe(port, enabled).await.map_err(|e| {
        rejected(e, |message| CoreError::Command {
            port: port.to_owned(),
            message,
        })
    })?;
    info!(port, enabled, "set PoE state");
    Ok(enabled)
}

/// Apply `action` to `port`. `On` and `Off` write without reading first;
/// `Toggle` reads the current state and writes its inverse.
pub async fn apply_poe_action(
    session: &SwitchSession,
    port: &str,
    action: PoeAction,
) -> Result<PoeChange, CoreError> {
    let previous = if action.needs_current() {
        Some(get_poe_enabled(session, port).await?)
    } else {
        None
    };
    let target = action.desired(previous.unwrap_or_default());
    let enabled = set_poe_enabled(session, port, target).await?;
    Ok(PoeChange {
        port: port.to_owned(),
        previous,
        enabled,
    })
}
