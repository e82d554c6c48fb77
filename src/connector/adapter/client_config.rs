use std::time::Duration;

use tracing::warn;

/// Service address used when neither a flag nor `LANGCHAIN_URL` names one.
pub const DEFAULT_BASE_URL: &str = "http://192.168.0.101:8002";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Where the LangChain service lives and how long a request may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Construct from environment variables, falling back to the defaults:
    ///
    /// | Variable            | Default                     |
    /// |---------------------|-----------------------------|
    /// | `LANGCHAIN_URL`     | `http://192.168.0.101:8002` |
    /// | `LANGCHAIN_TIMEOUT` | `120` (seconds)             |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("LANGCHAIN_URL").filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(raw) = lookup("LANGCHAIN_TIMEOUT") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(Duration::from_secs(secs)),
                _ => warn!(
                    "Ignoring LANGCHAIN_TIMEOUT='{}': not a positive number of seconds, using {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                ),
            }
        }
        config
    }

    /// Trailing slashes are dropped so endpoint paths can be appended directly.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
