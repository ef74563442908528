// ── Switch handle ──
//
// Owns the single authenticated session for one switch. Cheap to clone;
// every clone shares the same session. The switch only allows a handful of
// concurrent REST sessions, so the session must be released on every exit
// path. `oneshot` is the scoped form that guarantees it.

use std::future::Future;
use std::sync::Arc;

use aoss_api::SwitchSession;
use tracing::{debug, info, warn};

use crate::config::SwitchConfig;
use crate::error::CoreError;

struct SwitchInner {
    config: SwitchConfig,
    session: SwitchSession,
}

/// A logged-in switch.
#[derive(Clone)]
pub struct Switch {
    inner: Arc<SwitchInner>,
}

impl std::fmt::Debug for Switch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Switch")
            .field("host", &self.inner.config.host)
            .field("session", &self.inner.session)
            .finish()
    }
}

impl Switch {
    /// Log into the switch described by `config`.
    ///
    /// A rejected login fails with [`CoreError::AuthenticationFailed`] and
    /// issues no further requests.
    pub async fn connect(config: SwitchConfig) -> Result<Self, CoreError> {
        let base_url = config.base_url()?;
        let transport = config.transport();

        info!(switch = %config.host, "connecting");
        let session =
            SwitchSession::login(base_url, &config.username, &config.password, &transport).await?;
        debug!(switch = %config.host, "session established");

        Ok(Self {
            inner: Arc::new(SwitchInner { config, session }),
        })
    }

    /// Log out. Failure is reported but never fatal to the caller's work;
    /// the session is closed either way.
    pub async fn disconnect(&self) -> Result<(), CoreError> {
        match self.inner.session.logout().await {
            Ok(()) => {
                debug!(switch = %self.inner.config.host, "disconnected");
                Ok(())
            }
            Err(e) => {
                warn!(switch = %self.inner.config.host, error = %e, "logout failed (non-fatal)");
                Err(CoreError::SessionTeardown {
                    message: e.to_string(),
                })
            }
        }
    }

    /// Connect, run `f`, and always disconnect before returning `f`'s
    /// result. A logout failure is logged and does not mask the result.
    pub async fn oneshot<F, Fut, T>(config: SwitchConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Switch) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let switch = Switch::connect(config).await?;
        let result = f(switch.clone()).await;
        let _ = switch.disconnect().await;
        result
    }

    /// The session used for every request.
    pub fn session(&self) -> &SwitchSession {
        &self.inner.session
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.inner.config
    }

    pub fn is_connected(&self) -> bool {
        self.inner.session.is_active()
    }
}
