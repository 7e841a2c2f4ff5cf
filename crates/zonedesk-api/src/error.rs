use thiserror::Error;

/// Top-level error type for the `zonedesk-api` crate.
///
/// Covers every failure mode of the HTTP surface: authentication,
/// transport, acknowledgement envelopes and decoding. `zonedesk-core`
/// maps these into the user-facing taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected by the server. `message` is the server text, which
    /// may be empty when the server supplied none.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session cookie missing, expired, or revoked (HTTP 401).
    #[error("Session expired -- log in again")]
    SessionExpired,

    /// The session lacks the role required by the endpoint (HTTP 403).
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx response that is not an auth failure.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── API ─────────────────────────────────────────────────────────
    /// The server answered `{"success": false}`. The message is passed
    /// through verbatim when present.
    #[error("Request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the session is gone and logging in again
    /// might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// The message supplied by the server, if this error carries one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref().filter(|m| !m.is_empty()),
            Self::Authentication { message } | Self::Forbidden { message } => {
                Some(message.as_str()).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_without_message_has_no_server_message() {
        let err = Error::Rejected { message: None };
        assert!(err.server_message().is_none());

        let err = Error::Rejected {
            message: Some(String::new()),
        };
        assert!(err.server_message().is_none());
    }

    #[test]
    fn rejected_message_is_passed_through() {
        let err = Error::Rejected {
            message: Some("record already exists".into()),
        };
        assert_eq!(err.server_message(), Some("record already exists"));
        assert_eq!(err.to_string(), "Request rejected: record already exists");
    }

    #[test]
    fn session_expired_is_auth_expired() {
        assert!(Error::SessionExpired.is_auth_expired());
        assert!(!Error::Rejected { message: None }.is_auth_expired());
    }
}
