use thiserror::Error;

use crate::auth::{AccessLevel, Origin};

/// Top-level error type for the `bbox-api` crate.
///
/// Client-side refusals (`InvalidHost`, `AccessDenied`, `InvalidArgument`)
/// are raised before any request leaves the process. The remaining variants
/// describe what happened on the wire.
#[derive(Debug, Error)]
pub enum Error {
    // ── Client-side ─────────────────────────────────────────────────
    /// The target host could not be classified as a private or public address.
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// The access policy refused the call for the current origin and session.
    #[error("Access denied to {endpoint} from {origin} origin (requires {required})")]
    AccessDenied {
        endpoint: String,
        origin: Origin,
        required: AccessLevel,
    },

    /// A caller-supplied value is outside its documented domain.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    // ── Server ──────────────────────────────────────────────────────
    /// The router answered with a non-2xx status.
    #[error("API call to {url} failed with HTTP {status}")]
    ApiCallFailed { status: u16, url: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// 2xx response whose body does not have the expected shape,
    /// with the raw body for debugging.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, body: String },
}

impl Error {
    /// Returns `true` if the call was refused locally by the access policy.
    /// Logging in usually resolves it.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Returns `true` if this is a transient transport error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The HTTP status carried by an `ApiCallFailed` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiCallFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>, body: &str) -> Self {
        let preview = &body[..floor_char_boundary(body, 200)];
        Self::MalformedResponse {
            message: format!("{} (body preview: {preview:?})", message.into()),
            body: body.to_owned(),
        }
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
