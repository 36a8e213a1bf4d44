//! Client configuration.
//!
//! Values come from [`ClientConfig::default`] and may be overridden from the
//! environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `FINAVI_BASE_URL` | `base_url` | `https://wts.finavi.com.vn` |
//! | `FINAVI_TIMEOUT_MS` | `timeout_ms` | `10000` |
//! | `FINAVI_USER_AGENT` | `user_agent` | `finavi/<crate version>` |

use std::env;

use crate::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://wts.finavi.com.vn";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("finavi/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by any `FINAVI_*` variables that are set.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ValidationError> {
        if let Some(base_url) = lookup("FINAVI_BASE_URL") {
            let trimmed = base_url.trim();
            if !trimmed.is_empty() {
                self.base_url = trimmed.to_owned();
            }
        }

        if let Some(raw) = lookup("FINAVI_TIMEOUT_MS") {
            self.timeout_ms = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ValidationError::InvalidTimeout { value: raw })?;
        }

        if let Some(user_agent) = lookup("FINAVI_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                self.user_agent = user_agent;
            }
        }

        Ok(self)
    }
}
