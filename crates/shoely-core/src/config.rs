// ── Runtime connection configuration ──
//
// Describes *how* to reach the product service. Never touches disk:
// the config crate or the TUI builds a `ServiceConfig` and hands it in.

use std::time::Duration;

use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for talking to one product service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service base URL (e.g., `https://example.mockapi.io/api/v1`).
    pub url: Url,
    /// Collection segment under the base URL.
    pub resource: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ServiceConfig {
    pub const DEFAULT_RESOURCE: &'static str = "shoes";

    pub fn new(url: Url) -> Self {
        Self {
            url,
            resource: Self::DEFAULT_RESOURCE.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
