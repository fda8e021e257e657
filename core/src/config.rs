//! Client configuration with defaults and environment overrides.

use std::time::Duration;

use tracing::warn;

/// Endpoint of the public API.
pub const DEFAULT_BASE_URL: &str = "https://www.tukui.org/api.php";

/// Global per-request timeout applied by the default transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Overrides `ClientConfig::base_url`.
pub const BASE_URL_ENV: &str = "TUKUI_API_URL";

/// Overrides `ClientConfig::timeout`, in whole seconds. `0` disables it.
pub const TIMEOUT_ENV: &str = "TUKUI_TIMEOUT_SECS";

/// Settings used to build a `Client`.
///
/// `timeout` only affects the default transport; a caller-supplied transport
/// brings its own timeout policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: Some(format!("tukui-rs/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `TUKUI_API_URL` and `TUKUI_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Invalid values are logged and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV) {
            let url = url.trim();
            if url.is_empty() {
                warn!(var = BASE_URL_ENV, "ignoring empty base url override");
            } else {
                self.base_url = url.to_string();
            }
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(0) => self.timeout = None,
                Ok(secs) => self.timeout = Some(Duration::from_secs(secs)),
                Err(err) => warn!(var = TIMEOUT_ENV, value = %raw, %err, "ignoring invalid timeout"),
            }
        }

        self
    }
}
