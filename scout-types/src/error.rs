use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the scout workspace.
///
/// Engine adapters normalize vendor-specific failures into the structured
/// variants (`Http`, `RateLimited`, `AuthFailed`, `Network`, `Data`) so that
/// middleware and the router can make decisions without knowing which vendor
/// produced the error.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ScoutError {
    /// A single call exceeded its per-call deadline.
    #[error("timed out after {ms}ms: {label}")]
    Timeout {
        /// Human-readable label for the call that timed out (engine + operation).
        label: String,
        /// The deadline that was exceeded, in milliseconds.
        ms: u64,
    },

    /// The whole request exceeded its end-to-end deadline.
    #[error("request deadline exceeded while serving {capability}")]
    RequestTimeout {
        /// The capability being served when the deadline hit.
        capability: String,
    },

    /// The provider answered with a non-success HTTP status that is neither
    /// a rate limit nor an authentication failure.
    #[error("provider returned http status {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// The provider throttled the call (HTTP 429).
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested wait before retrying, in milliseconds. Zero when the
        /// provider gave no `Retry-After` hint.
        retry_after_ms: u64,
    },

    /// The provider rejected the credentials (HTTP 401/403).
    #[error("authentication failed with status {status}")]
    AuthFailed {
        /// The HTTP status code.
        status: u16,
    },

    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered but the payload could not be decoded or was
    /// structurally invalid.
    #[error("malformed provider payload: {0}")]
    Data(String),

    /// Caller passed an invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The targeted engine does not implement the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// The capability that was requested.
        capability: String,
    },

    /// The requested entity does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// Description of what was looked up.
        what: String,
    },

    /// Engine-specific failure that does not fit a structured variant.
    #[error("engine '{engine}' failed: {msg}")]
    Engine {
        /// Name of the engine that failed.
        engine: String,
        /// Engine-provided detail.
        msg: String,
    },

    /// No registered engine implements the requested capability.
    #[error("no provider available for {capability}")]
    NoProviderAvailable {
        /// The capability that could not be served.
        capability: String,
    },

    /// Every eligible engine was attempted and all failed.
    #[error("all engines failed ({} error(s))", .0.len())]
    AllEnginesFailed(Vec<ScoutError>),

    /// Every eligible engine was attempted and all timed out.
    #[error("all engines timed out while serving {capability}")]
    AllEnginesTimedOut {
        /// The capability being served.
        capability: String,
    },

    /// The engine is in a cooldown window after an authentication failure.
    #[error("engine cooling down, resets in {reset_in_ms}ms")]
    CoolingDown {
        /// Remaining cooldown, in milliseconds.
        reset_in_ms: u64,
    },

    /// A middleware stack was composed in an order that would be incorrect.
    #[error("invalid middleware stack: {message}")]
    InvalidMiddlewareStack {
        /// Why the stack was rejected.
        message: String,
    },
}

impl ScoutError {
    /// Construct a [`ScoutError::Timeout`].
    pub fn timeout(label: impl Into<String>, ms: u64) -> Self {
        Self::Timeout {
            label: label.into(),
            ms,
        }
    }

    /// Construct a [`ScoutError::RequestTimeout`].
    pub fn request_timeout(capability: impl ToString) -> Self {
        Self::RequestTimeout {
            capability: capability.to_string(),
        }
    }

    /// Construct a [`ScoutError::Unsupported`].
    pub fn unsupported(capability: impl ToString) -> Self {
        Self::Unsupported {
            capability: capability.to_string(),
        }
    }

    /// Construct a [`ScoutError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Construct a [`ScoutError::Engine`].
    pub fn engine(engine: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Engine {
            engine: engine.into(),
            msg: msg.into(),
        }
    }

    /// Construct a [`ScoutError::InvalidArg`].
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Construct a [`ScoutError::NoProviderAvailable`].
    pub fn no_provider(capability: impl ToString) -> Self {
        Self::NoProviderAvailable {
            capability: capability.to_string(),
        }
    }

    /// Whether a retry of the same call could plausibly succeed.
    ///
    /// Only transient transport failures, throttling, and server-side errors
    /// qualify. Authentication failures, client errors, and decode errors are
    /// deterministic and retrying them only burns budget.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited { .. } => true,
            Self::Http { status } => (500..=599).contains(status),
            _ => false,
        }
    }

    /// Whether the error indicates a caller-side problem worth surfacing
    /// verbatim (as opposed to an aggregate or infrastructural failure).
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArg(_) | Self::AuthFailed { .. } | Self::Unsupported { .. }
        )
    }

    /// Recursively flatten nested [`ScoutError::AllEnginesFailed`] aggregates
    /// into a single flat list of leaf errors.
    #[must_use]
    pub fn flatten(self) -> Vec<ScoutError> {
        match self {
            Self::AllEnginesFailed(errors) => {
                errors.into_iter().flat_map(ScoutError::flatten).collect()
            }
            other => vec![other],
        }
    }
}
