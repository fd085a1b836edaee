//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session time-to-live in minutes. Expiry is absolute: the clock
    /// starts at issuance and is never extended by activity.
    #[serde(default = "default_ttl")]
    pub ttl_minutes: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Number of random bytes fed into the token digest. The token
    /// generator rejects anything below 32.
    #[serde(default = "default_entropy_bytes")]
    pub token_entropy_bytes: usize,
    /// Upper bound on any single session-store call, in seconds.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl(),
            cookie_name: default_cookie_name(),
            token_entropy_bytes: default_entropy_bytes(),
            store_timeout_seconds: default_store_timeout(),
        }
    }
}

fn default_ttl() -> u64 {
    60
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_entropy_bytes() -> usize {
    64
}

fn default_store_timeout() -> u64 {
    5
}
