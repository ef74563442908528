//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(MASK.into());
        }
    }
    cfg
}

/// Format config for display as TOML-like text, secrets masked.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(
        out,
        "request_interval_ms = {}",
        cfg.defaults.request_interval_ms
    );

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "switch = \"{}\"", p.switch);
        if let Some(ref proto) = p.protocol {
            let _ = writeln!(out, "protocol = \"{proto}\"");
        }
        if let Some(ref version) = p.api_version {
            let _ = writeln!(out, "api_version = \"{version}\"");
        }
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"{MASK}\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(interval) = p.request_interval_ms {
            let _ = writeln!(out, "request_interval_ms = {interval}");
        }
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str, hint: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: hint.into(),
    })
}

/// Apply `key = value` to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "switch" => profile.switch = value,
        "protocol" => {
            if !matches!(value.as_str(), "http" | "https") {
                return Err(CliError::Validation {
                    field: "protocol".into(),
                    reason: "must be 'http' or 'https'".into(),
                });
            }
            profile.protocol = Some(value);
        }
        "api_version" | "api-version" => profile.api_version = Some(value),
        "username" => profile.username = Some(value),
        "password_env" | "password-env" => profile.password_env = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(parse_field("insecure", &value, "must be 'true' or 'false'")?);
        }
        "timeout" => {
            profile.timeout = Some(parse_field("timeout", &value, "must be a number (seconds)")?);
        }
        "request_interval_ms" | "request-interval-ms" => {
            profile.request_interval_ms = Some(parse_field(
                "request_interval_ms",
                &value,
                "must be a number (milliseconds)",
            )?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: switch, protocol, api_version, \
                     username, password_env, ca_cert, insecure, timeout, request_interval_ms"
                ),
            });
        }
    }
    Ok(())
}

fn store_in_keyring(profile_name: &str, password: &str) -> Result<(), CliError> {
    aoss_config::store_password(profile_name, password).map_err(|e| CliError::Validation {
        field: "keyring".into(),
        reason: format!("failed to store password in keyring: {e}"),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("aoss configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let switch: String = Input::new()
                .with_prompt("Switch IP or DNS name")
                .interact_text()
                .map_err(prompt_err)?;

            let protocols = &["http", "https"];
            let protocol = Select::new()
                .with_prompt("Web management protocol")
                .items(protocols)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let insecure = protocol == 1
                && Confirm::new()
                    .with_prompt("Accept the switch's self-signed certificate?")
                    .default(true)
                    .interact()
                    .map_err(prompt_err)?;

            let username: String = Input::new()
                .with_prompt("Username (manager rights)")
                .default("manager".into())
                .interact_text()
                .map_err(prompt_err)?;

            let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;

            let choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
                "Don't store (use --password or AOSS_PASSWORD)",
            ];
            let storage = Select::new()
                .with_prompt("Where to store the password?")
                .items(choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let plaintext = match storage {
                0 if !password.is_empty() => {
                    store_in_keyring(&profile_name, &password)?;
                    eprintln!("   Password stored in system keyring");
                    None
                }
                1 => Some(password),
                _ => None,
            };

            let profile = Profile {
                switch,
                protocol: Some(protocols[protocol.min(1)].into()),
                username: Some(username),
                password: plaintext,
                insecure: insecure.then_some(true),
                ..Profile::default()
            };

            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: aoss vlans list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            set_profile_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            eprintln!("Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: config::available_profiles(&cfg),
                });
            }

            let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            store_in_keyring(&profile_name, &password)?;

            eprintln!("Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_known_keys() {
        let mut profile = Profile::default();
        set_profile_key(&mut profile, "switch", "10.0.0.2".into()).expect("switch");
        set_profile_key(&mut profile, "timeout", "9".into()).expect("timeout");
        set_profile_key(&mut profile, "request-interval-ms", "0".into()).expect("interval");
        assert_eq!(profile.switch, "10.0.0.2");
        assert_eq!(profile.timeout, Some(9));
        assert_eq!(profile.request_interval_ms, Some(0));
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut profile = Profile::default();
        assert!(set_profile_key(&mut profile, "protocol", "telnet".into()).is_err());
        assert!(set_profile_key(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_profile_key(&mut profile, "password", "x".into()).is_err());
    }

    #[test]
    fn show_masks_passwords() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "core".into(),
            Profile {
                switch: "10.0.0.2".into(),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );
        let masked = redacted(&cfg);
        let text = format_config_redacted(&masked);
        assert!(!text.contains("hunter2"));
        assert!(text.contains("password = \"****\""));
        assert_eq!(masked.profiles["core"].password.as_deref(), Some(MASK));
    }
}
