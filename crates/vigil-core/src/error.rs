use thiserror::Error;

/// Top-level error type for the `vigil-core` crate.
///
/// Gateway failures pass through as [`CoreError::Api`]; the layer adds
/// only client-side validation rejections, which happen before any
/// request is issued. Absent entities are NOT an error: detail lookups
/// return `Ok(None)` in both modes (live 404s are mapped, the fixture
/// store is lenient by construction).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Gateway failure -- transport or application, see `vigil_api::Error`.
    #[error(transparent)]
    Api(#[from] vigil_api::Error),

    /// Rejected client-side before any request (e.g. an empty
    /// remediation note or case title).
    #[error("Validation rejected: {message}")]
    Validation { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a transient transport failure worth a
    /// single retry (reads only -- mutations are never retried).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api(e) => e.is_transient(),
            Self::Validation { .. } => false,
        }
    }
}
