use thiserror::Error;

/// Top-level error type for the `vigil-api` crate.
///
/// Every failure mode of the HTTP gateway is normalized into this enum:
/// transport failures (network unreachable, timeouts) are distinguished from
/// application errors (4xx/5xx with a message body), but both surface through
/// the same type. `vigil-core` maps these into user-facing states.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed or the bearer token was rejected (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Application ─────────────────────────────────────────────────
    /// Structured error from the Vigil API (4xx/5xx with a message body).
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The requested entity does not exist (HTTP 404).
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the session credential
    /// has expired and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Only transport-level failures qualify; application errors are
    /// deterministic and retrying them would just repeat the failure.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::NotFound { .. } => true,
            _ => false,
        }
    }
}
