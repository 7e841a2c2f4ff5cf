//! CLI configuration: a thin layer over `zonedesk_config` that applies
//! `GlobalOpts` flag overrides (--server, --user, --insecure, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use zonedesk_core::{ConsoleConfig, PageContext, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use zonedesk_config::{
    Config, Defaults, PASSWORD_ENV, Profile, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the console configuration for this invocation.
///
/// A matching profile supplies everything, with flags taking priority.
/// Without one, `--server` and `--user` are required and the password
/// comes from `ZONEDESK_PASSWORD` or an interactive prompt.
pub fn build_console_config(global: &GlobalOpts) -> Result<(String, ConsoleConfig), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let config = resolve_profile(profile, &profile_name, &cfg.defaults, global)?;
        return Ok((profile_name, config));
    }

    if global.profile.is_some() {
        return Err(zonedesk_config::ConfigError::UnknownProfile { name: profile_name }.into());
    }

    let server = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = zonedesk_config::parse_server_url(server)?;
    let username = global.user.clone().ok_or_else(|| CliError::NoCredentials {
        profile: profile_name.clone(),
    })?;
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(pw) => SecretString::from(pw),
        Err(_) => prompt_password(&format!("Password for {username}: "))?,
    };

    let mut config = ConsoleConfig::new(url, username, password);
    config.tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };
    config.timeout = Duration::from_secs(global.timeout);
    config.page = PageContext::default();
    Ok((profile_name, config))
}

/// Translate a `Profile` plus global flags into a `ConsoleConfig`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ConsoleConfig, CliError> {
    let mut profile = profile.clone();
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if let Some(ref user) = global.user {
        profile.username = Some(user.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }

    let mut config = zonedesk_config::profile_to_console_config(&profile, profile_name, defaults)
        .map_err(|e| CliError::from(e).for_profile(profile_name))?;

    // The flag only wins when it was moved off its default.
    if global.timeout != crate::cli::DEFAULT_TIMEOUT_SECS {
        config.timeout = Duration::from_secs(global.timeout);
    }
    Ok(config)
}

pub fn prompt_password(prompt: &str) -> Result<SecretString, CliError> {
    let pw = rpassword::prompt_password(prompt)?;
    Ok(SecretString::from(pw))
}
