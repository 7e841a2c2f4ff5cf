//! Config subcommand handlers.

use dialoguer::{Input, Select};

use zonedesk_core::Role;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext passwords masked.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            insecure: cfg.defaults.insecure,
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                let mut p = p.clone();
                if p.password.is_some() {
                    p.password = Some(MASK.into());
                }
                (name.clone(), p)
            })
            .collect(),
    }
}

/// TOML-ish text view of the config, secrets masked.
fn format_config(cfg: &Config) -> String {
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

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"{MASK}\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        let _ = writeln!(out, "role = \"{}\"", p.role);
        let _ = writeln!(out, "allow_users_create_ns = {}", p.allow_users_create_ns);
        let _ = writeln!(out, "allow_users_create_a = {}", p.allow_users_create_a);
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn profile_not_found(cfg: &Config, name: String) -> CliError {
    let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
    available.sort();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// Store the password in the keyring, or hand it back for the config file.
fn store_password(profile_name: &str, password: String) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        zonedesk_config::store_password(profile_name, &password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(global.output, &redacted(&cfg), format_config, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(&cfg, profile_name));
            }

            let password = rpassword::prompt_password(format!("Password for '{profile_name}': "))
                .map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            zonedesk_config::store_password(&profile_name, &password)?;
            eprintln!("✓ Password for '{profile_name}' stored in system keyring");
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&cfg, name));
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}

/// Interactive wizard. Adds or replaces one profile and makes it the default.
fn init() -> Result<(), CliError> {
    let path = config::config_path();
    eprintln!("zonedesk configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let server: String = Input::new()
        .with_prompt("Server URL")
        .default("https://dns.example.com".into())
        .interact_text()
        .map_err(prompt_err)?;
    zonedesk_config::parse_server_url(&server)?;

    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(prompt_err)?;
    let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if username.is_empty() || password.is_empty() {
        return Err(CliError::Validation {
            field: "credentials".into(),
            reason: "username and password cannot be empty".into(),
        });
    }
    let password = store_password(&profile_name, password)?;

    let roles = &["user", "admin"];
    let role = match Select::new()
        .with_prompt("Account role")
        .items(roles)
        .default(0)
        .interact()
        .map_err(prompt_err)?
    {
        1 => Role::Admin,
        _ => Role::User,
    };

    let profile = Profile {
        server,
        username: Some(username),
        password,
        role,
        ..Profile::default()
    };

    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());

    let written = config::save_config(&cfg)?;
    eprintln!("\n✓ Configuration written to {}", written.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: zonedesk zones list");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "home".into(),
            Profile {
                server: "https://dns.example.com".into(),
                username: Some("alice".into()),
                password: Some("hunter2".into()),
                role: Role::Admin,
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn show_masks_plaintext_password() {
        let cfg = sample();
        let text = format_config(&cfg);
        assert!(text.contains("[profiles.home]"));
        assert!(text.contains("password = \"****\""));
        assert!(text.contains("role = \"admin\""));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn structured_output_is_redacted_too() {
        let cfg = redacted(&sample());
        assert_eq!(cfg.profiles["home"].password.as_deref(), Some(MASK));
        assert_eq!(cfg.profiles["home"].username.as_deref(), Some("alice"));
    }

    #[test]
    fn missing_profile_lists_alternatives() {
        let err = profile_not_found(&sample(), "work".into());
        assert!(matches!(
            err,
            CliError::ProfileNotFound { ref available, .. } if available == "home"
        ));
    }
}
