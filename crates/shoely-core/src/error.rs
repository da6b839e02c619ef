// ── Core error types ──
//
// User-facing errors from shoely-core. Consumers never see raw HTTP or
// JSON failures; the `From<shoely_api::Error>` impl translates them into
// domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the product service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Product service timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Product not found: {identifier}")]
    NotFound { identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shoely_api::Error> for CoreError {
    fn from(err: shoely_api::Error) -> Self {
        match err {
            shoely_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            shoely_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            shoely_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            shoely_api::Error::Api { status: 404, message } => {
                CoreError::NotFound { identifier: message }
            }
            shoely_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            shoely_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
