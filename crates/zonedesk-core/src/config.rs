// ── Runtime console configuration ──
//
// These types describe how to reach a zonedesk server and what the
// surrounding page told us about the user. They carry credential data
// but never touch disk; the CLI builds a `ConsoleConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use zonedesk_api::TlsMode;

use crate::model::Role;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Read-only globals the server renders into the page: the signed-in
/// user's role and the admin-set permission flags for non-admin users.
///
/// The API never reports these, so they are injected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageContext {
    pub role: Role,
    pub allow_users_create_ns: bool,
    pub allow_users_create_a: bool,
}

/// Configuration for one console session against one server.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Server base URL (e.g., `https://dns.example.com`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Request timeout, enforced by the transport.
    pub timeout: Duration,
    pub page: PageContext,
}

impl ConsoleConfig {
    pub fn new(url: Url, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            url,
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page: PageContext::default(),
        }
    }
}
