// Credential handling for the Brewfather API

use base64::Engine;
use thiserror::Error;

/// Environment variable holding the Brewfather user id.
pub const USER_ID_VAR: &str = "BREWFATHER_USER_ID";
/// Environment variable holding the Brewfather API key.
pub const API_KEY_VAR: &str = "BREWFATHER_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
}

/// Brewfather API credential pair, loaded once at startup and read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct Credentials {
    user_id: String,
    api_key: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Read credentials from the process environment. Both variables must be
    /// present and non-empty; startup must fail otherwise rather than issue
    /// unauthenticated requests.
    pub fn from_env() -> Result<Self, ConfigError> {
        let user_id = require_var(USER_ID_VAR)?;
        let api_key = require_var(API_KEY_VAR)?;
        Ok(Self { user_id, api_key })
    }

    /// Basic-Auth header value: `Basic {base64(user_id:api_key)}`.
    pub fn auth_header(&self) -> String {
        let raw = format!("{}:{}", self.user_id, self.api_key);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_header_encodes_basic_pair() {
        let credentials = Credentials::new("user", "key");
        // base64("user:key")
        assert_eq!(credentials.auth_header(), "Basic dXNlcjprZXk=");
    }

    #[test]
    fn missing_or_empty_vars_are_rejected() {
        // Single test to avoid racing on process-wide env state.
        std::env::remove_var(USER_ID_VAR);
        std::env::remove_var(API_KEY_VAR);
        assert!(matches!(
            Credentials::from_env(),
            Err(ConfigError::MissingVar(USER_ID_VAR))
        ));

        std::env::set_var(USER_ID_VAR, "user");
        std::env::set_var(API_KEY_VAR, "");
        assert!(matches!(
            Credentials::from_env(),
            Err(ConfigError::MissingVar(API_KEY_VAR))
        ));

        std::env::set_var(API_KEY_VAR, "key");
        let credentials = Credentials::from_env().unwrap();
        assert_eq!(credentials.auth_header(), "Basic dXNlcjprZXk=");

        std::env::remove_var(USER_ID_VAR);
        std::env::remove_var(API_KEY_VAR);
    }
}
