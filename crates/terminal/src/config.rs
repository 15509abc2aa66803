//! Client configuration.

/// Environment variable holding the backend base URL.
pub const API_BASE_ENV: &str = "TSM_API_BASE";

/// Backend used when nothing is configured (local development server).
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosConfig {
    /// Base URL without a trailing slash; endpoint paths are appended to it.
    pub api_base: String,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl PosConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        Self {
            api_base: api_base.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(API_BASE_ENV) {
            Some(value) if !value.trim().is_empty() => Self::new(value),
            _ => Self::default(),
        }
    }

    /// Apply a command-line override, if one was given.
    pub fn with_api_base_override(self, api_base: Option<String>) -> Self {
        match api_base {
            Some(value) if !value.trim().is_empty() => Self::new(value),
            _ => self,
        }
    }
}
