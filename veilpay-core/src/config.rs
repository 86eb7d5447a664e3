//! Configuration for directory clients.

use serde::{Deserialize, Serialize};

/// Configuration for the API gateway the directory clients talk to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Gateway base URL (e.g., "http://localhost:8001").
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl DirectoryConfig {
    /// Create a new gateway configuration.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Configuration for a gateway on the local machine.
    pub fn localhost() -> Self {
        Self::new("http://localhost:8001")
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::localhost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DirectoryConfig::localhost();
        assert_eq!(config.api_url, "http://localhost:8001");
        assert_eq!(config.timeout_secs, 30);

        let config = DirectoryConfig::new("http://gateway:9000").with_timeout(5);
        assert_eq!(config.timeout_secs, 5);
    }
}
