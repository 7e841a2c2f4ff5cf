// ── Core error types ──
//
// User-facing errors from zonedesk-core. These are NOT API-specific:
// consumers never see HTTP status codes or JSON parse failures directly.
// `CoreError::from_api` translates transport-layer errors into the
// validation / auth / request taxonomy the console reports.

use thiserror::Error;

/// Shown whenever the server could not be reached or gave no usable answer.
pub const CONNECTIVITY_MESSAGE: &str = "Could not reach the server";

const TIMED_OUT_SUFFIX: &str = "(timed out)";

/// Why a request produced no usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The server answered and said no.
    Rejected,
    /// No usable answer came back.
    Unreachable,
    TimedOut,
}

/// Login and session failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{message}")]
    InvalidCredentials { message: String },

    #[error("Session expired -- log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotAuthenticated,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Client-side (no request was made) ────────────────────────────
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("No zone selected")]
    NoZoneSelected,

    #[error("{what} is managed by the server and cannot be changed")]
    ReadOnly { what: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("A sync is already in progress")]
    Busy,

    // ── Server / transport ───────────────────────────────────────────
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("{message}")]
    Request { message: String, kind: RequestKind },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Translate an API error, using `fallback` when the server rejected
    /// the request without saying why.
    pub fn from_api(err: zonedesk_api::Error, fallback: &str) -> Self {
        use zonedesk_api::Error as Api;

        let message = err.server_message().map(str::to_owned);
        match err {
            Api::Authentication { .. } => Self::Auth(AuthError::InvalidCredentials {
                message: message.unwrap_or_else(|| fallback.to_owned()),
            }),
            Api::SessionExpired => Self::Auth(AuthError::SessionExpired),
            Api::Forbidden { message } => Self::Forbidden { message },
            Api::Rejected { .. } => Self::Request {
                message: message.unwrap_or_else(|| fallback.to_owned()),
                kind: RequestKind::Rejected,
            },
            Api::Http { status, .. } => Self::Request {
                message: format!("{CONNECTIVITY_MESSAGE} (HTTP {status})"),
                kind: RequestKind::Unreachable,
            },
            Api::Transport(e) if e.is_timeout() => Self::Request {
                message: format!("{CONNECTIVITY_MESSAGE} {TIMED_OUT_SUFFIX}"),
                kind: RequestKind::TimedOut,
            },
            Api::Transport(_) | Api::Deserialization { .. } => Self::Request {
                message: CONNECTIVITY_MESSAGE.to_owned(),
                kind: RequestKind::Unreachable,
            },
            Api::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::Tls(message) => Self::Config { message },
        }
    }

    /// `true` when the error was raised before any request was sent.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NoZoneSelected
                | Self::ReadOnly { .. }
                | Self::Cancelled
                | Self::Busy
        )
    }

    /// `true` when no usable answer came back from the server.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::Request {
                kind: RequestKind::Unreachable | RequestKind::TimedOut,
                ..
            }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Request {
                kind: RequestKind::TimedOut,
                ..
            }
        )
    }

    /// Prefix a request failure's message, keeping its kind.
    pub(crate) fn after(self, done: &str, what: &str) -> Self {
        match self {
            Self::Request { message, kind } => Self::Request {
                message: format!("{done}, but refreshing {what} failed: {message}"),
                kind,
            },
            other => other,
        }
    }

    /// `true` when the server signalled that the session is gone.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Auth(AuthError::SessionExpired))
    }
}

impl From<zonedesk_api::Error> for CoreError {
    fn from(err: zonedesk_api::Error) -> Self {
        Self::from_api(err, CONNECTIVITY_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_without_message_uses_fallback() {
        let err = CoreError::from_api(
            zonedesk_api::Error::Rejected { message: None },
            "Failed to save record",
        );
        assert_eq!(err.to_string(), "Failed to save record");
    }

    #[test]
    fn rejection_message_is_verbatim() {
        let err = CoreError::from_api(
            zonedesk_api::Error::Rejected {
                message: Some("CNAME conflicts with existing record".into()),
            },
            "Failed to save record",
        );
        assert_eq!(err.to_string(), "CNAME conflicts with existing record");
    }

    #[test]
    fn http_status_is_connectivity_error() {
        let err = CoreError::from(zonedesk_api::Error::Http {
            status: 502,
            body: "bad gateway".into(),
        });
        assert_eq!(err.to_string(), "Could not reach the server (HTTP 502)");
        assert!(err.is_connectivity());
        assert!(!err.is_timeout());
    }

    #[test]
    fn server_rejection_is_not_connectivity() {
        let err = CoreError::from_api(zonedesk_api::Error::Rejected { message: None }, "Nope");
        assert!(!err.is_connectivity());
    }

    #[test]
    fn server_text_mentioning_reachability_stays_a_rejection() {
        let err = CoreError::from_api(
            zonedesk_api::Error::Rejected {
                message: Some("Could not reach the server for zone transfer".into()),
            },
            "Failed to create zone",
        );
        assert!(!err.is_connectivity());
        assert!(!err.is_timeout());
        assert!(matches!(
            err,
            CoreError::Request {
                kind: RequestKind::Rejected,
                ..
            }
        ));
    }

    #[test]
    fn refresh_failure_keeps_kind() {
        let err = CoreError::from(zonedesk_api::Error::Http {
            status: 500,
            body: String::new(),
        })
        .after("Record saved", "the table");
        assert!(err.is_connectivity());
        assert_eq!(
            err.to_string(),
            "Record saved, but refreshing the table failed: Could not reach the server (HTTP 500)"
        );
    }

    #[test]
    fn empty_login_message_uses_default() {
        let err = CoreError::from_api(
            zonedesk_api::Error::Authentication {
                message: String::new(),
            },
            "Invalid username or password",
        );
        assert!(matches!(
            err,
            CoreError::Auth(AuthError::InvalidCredentials { ref message })
                if message == "Invalid username or password"
        ));
    }

    #[test]
    fn expiry_is_detected() {
        let err = CoreError::from(zonedesk_api::Error::SessionExpired);
        assert!(err.is_session_expired());
        assert!(!err.is_client_side());
    }
}
