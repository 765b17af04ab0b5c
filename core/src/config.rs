//! Client configuration.
//!
//! Read once at startup. The default user id is an explicit value handed to
//! whichever controller needs a subject; nothing in the crate reads it
//! implicitly.

use std::env;

/// Environment variable holding the service base address.
pub const API_URL_VAR: &str = "GEO_API_URL";
/// Environment variable holding the demo user's id.
pub const DEFAULT_USER_VAR: &str = "GEO_DEFAULT_USER_ID";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_ID: &str = "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub default_user_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            default_user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build from the process environment, falling back to the local
    /// development defaults for unset or empty variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, fallback: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            base_url: read(API_URL_VAR, DEFAULT_API_URL),
            default_user_id: read(DEFAULT_USER_VAR, DEFAULT_USER_ID),
        }
    }

    pub fn with_default_user(mut self, user_id: impl Into<String>) -> Self {
        self.default_user_id = user_id.into();
        self
    }
}
