//! CLI configuration: thin wrapper around `printlink_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--url, --api-key, --insecure, --timeout).

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use printlink_core::{MonitorConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use printlink_config::{Config, config_path};

/// The config file in effect: `--config` if given, else the platform path.
pub fn effective_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(printlink_config::load_config_from(&effective_path(global))?)
}

/// Build the `MonitorConfig` for this invocation.
///
/// A matching profile is the base and flags override it. Without a
/// profile, `--url` alone is enough; naming a missing profile is an
/// error.
pub fn build_monitor_config(global: &GlobalOpts) -> Result<MonitorConfig, CliError> {
    let cfg = load(global)?;

    let mut config = match cfg.profile(global.profile.as_deref()) {
        Ok((name, profile)) => {
            let mut profile = profile.clone();
            if let Some(ref url) = global.url {
                profile.url.clone_from(url);
            }
            printlink_config::profile_to_monitor_config(&profile, name, &cfg.defaults)?
        }
        Err(_) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: global.profile.clone().unwrap_or_default(),
                available: available_profiles(&cfg),
            });
        }
        Err(_) => {
            let url_str = global.url.as_deref().ok_or_else(|| CliError::NoConfig {
                path: effective_path(global).display().to_string(),
            })?;
            let mut config = MonitorConfig::new(parse_url(url_str)?);
            config.timeout = Duration::from_secs(cfg.defaults.timeout.max(1));
            config.poll_interval = Duration::from_secs(cfg.defaults.poll_interval.max(1));
            if cfg.defaults.insecure {
                config.tls = TlsVerification::DangerAcceptInvalid;
            }
            config
        }
    };

    apply_overrides(&mut config, global)?;
    Ok(config)
}

fn apply_overrides(config: &mut MonitorConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref key) = global.api_key {
        config.api_key = Some(SecretString::from(key.clone()));
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        config.timeout = Duration::from_secs(secs);
    }
    Ok(())
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        return "(none)".into();
    }
    cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
}
