//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable process exit code.

use miette::Diagnostic;
use thiserror::Error;

use zonedesk_config::ConfigError;
use zonedesk_core::{AuthError, CoreError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(zonedesk::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert in the profile."
        )
    )]
    ConnectionFailed { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(zonedesk::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(zonedesk::auth_failed),
        help(
            "Verify your username and password.\n\
             Store a new password with: zonedesk config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("Session expired")]
    #[diagnostic(code(zonedesk::session_expired), help("Run the command again to sign in."))]
    SessionExpired,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(zonedesk::no_credentials),
        help(
            "Configure credentials with: zonedesk config init\n\
             Or set ZONEDESK_USERNAME and ZONEDESK_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error("Permission denied: {message}")]
    #[diagnostic(
        code(zonedesk::forbidden),
        help("This operation needs a role the signed-in account does not have.")
    )]
    Forbidden { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(zonedesk::not_found),
        help("Run: zonedesk {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Server ───────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(zonedesk::request_failed))]
    Request { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(zonedesk::busy),
        help("Wait for the running operation to finish.")
    )]
    Busy { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(zonedesk::validation))]
    Validation { field: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(zonedesk::read_only))]
    ReadOnly { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(zonedesk::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: zonedesk config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(zonedesk::no_config),
        help(
            "Create a profile with: zonedesk config init\n\
             Or pass --server. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(zonedesk::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Operation cancelled")]
    #[diagnostic(
        code(zonedesk::cancelled),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    Cancelled,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(zonedesk::output))]
    Output(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::SessionExpired | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::Forbidden { .. } | Self::ReadOnly { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            Self::Request { .. }
            | Self::Busy { .. }
            | Self::Config(_)
            | Self::Cancelled
            | Self::Io(_)
            | Self::Output(_) => exit_code::GENERAL,
        }
    }

    /// Attach the profile name to authentication failures.
    pub fn for_profile(self, profile: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                profile: profile.to_owned(),
                message,
            },
            other => other,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                message: err.to_string(),
            };
        }
        if err.is_connectivity() {
            return Self::ConnectionFailed {
                message: err.to_string(),
            };
        }
        match err {
            CoreError::Validation { field, message } => Self::Validation {
                field: field.to_owned(),
                reason: message,
            },
            CoreError::NoZoneSelected => Self::Validation {
                field: "zone".into(),
                reason: "no zone selected".into(),
            },
            CoreError::ReadOnly { .. } => Self::ReadOnly {
                message: err.to_string(),
            },
            CoreError::NotFound { entity, id } => Self::NotFound {
                resource_type: entity.to_owned(),
                list_command: list_command_for(entity).to_owned(),
                identifier: id,
            },
            CoreError::Cancelled => Self::Cancelled,
            CoreError::Busy => Self::Busy {
                message: err.to_string(),
            },
            CoreError::Auth(AuthError::SessionExpired) => Self::SessionExpired,
            CoreError::Auth(AuthError::InvalidCredentials { message }) => Self::AuthFailed {
                profile: "default".into(),
                message,
            },
            CoreError::Auth(AuthError::NotAuthenticated) => Self::AuthFailed {
                profile: "default".into(),
                message: "Not logged in".into(),
            },
            CoreError::Forbidden { message } => Self::Forbidden { message },
            CoreError::Request { message, .. } => Self::Request { message },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: available_profiles(),
            },
            other => Self::Config(other),
        }
    }
}

fn list_command_for(entity: &str) -> &'static str {
    match entity {
        "record" => "records list <zone>",
        _ => "zones list",
    }
}

fn available_profiles() -> String {
    let cfg = zonedesk_config::load_config_or_default();
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}
