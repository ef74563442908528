//! CLI configuration: thin wrapper around `aoss_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--switch, --password, --timeout, ...) on top of the profile.

use std::time::Duration;

use secrecy::SecretString;

use aoss_core::{Protocol, SwitchConfig, TlsVerification};

use crate::cli::{GlobalOpts, ProtocolArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use aoss_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Comma-separated profile names, for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build the `SwitchConfig` for this invocation.
///
/// Precedence per field: CLI flag / `AOSS_*` env > profile > `[defaults]`.
/// Works without any config file when `--switch` is given.
pub fn resolve_switch_config(global: &GlobalOpts) -> Result<SwitchConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => Profile::default(),
    };

    // 1. Switch address (flag > env > profile)
    if let Some(ref switch) = global.switch {
        profile.switch.clone_from(switch);
    }
    if profile.switch.trim().is_empty() {
        return Err(CliError::NoSwitch {
            path: config_path().display().to_string(),
        });
    }

    // 2. Password (flag/env > profile chain)
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => aoss_config::resolve_password(&profile, &profile_name)?,
    };

    let mut switch = aoss_config::profile_to_switch_config(&profile, &cfg.defaults, password)?;

    // 3. Remaining overrides
    if let Some(ref username) = global.username {
        switch.username.clone_from(username);
    }
    if let Some(protocol) = global.protocol {
        switch.protocol = match protocol {
            ProtocolArg::Http => Protocol::Http,
            ProtocolArg::Https => Protocol::Https,
        };
    }
    if let Some(ref version) = global.api_version {
        switch.api_version.clone_from(version);
    }
    if global.insecure {
        switch.tls = TlsVerification::DangerAcceptInvalid;
    } else if let Some(ref ca) = global.ca_cert {
        switch.tls = TlsVerification::CustomCa(ca.clone());
    }
    if let Some(secs) = global.timeout {
        switch.timeout = Duration::from_secs(secs);
    }
    if let Some(ms) = global.request_interval {
        switch.request_interval = Duration::from_millis(ms);
    }

    Ok(switch)
}
