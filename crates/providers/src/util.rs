//! Shared utility functions for provider adapters.

use lh_domain::config::AuthConfig;
use lh_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Resolve the API key from an [`AuthConfig`].
///
/// Precedence:
/// 1. `none = true` → no key (`Ok(None)`)
/// 2. `key` field (plaintext, warns)
/// 3. `env` field (reads environment variable)
/// 4. Error
pub fn resolve_api_key(auth: &AuthConfig) -> Result<Option<String>> {
    if auth.none {
        return Ok(None);
    }

    if let Some(ref key) = auth.key {
        tracing::warn!(
            "API key loaded from plaintext config field 'key'; \
             prefer 'env' instead"
        );
        return Ok(Some(key.clone()));
    }

    if let Some(ref env_var) = auth.env {
        return match std::env::var(env_var) {
            Ok(val) if !val.trim().is_empty() => Ok(Some(val)),
            Ok(_) => Err(Error::Auth(format!("environment variable '{env_var}' is empty"))),
            Err(_) => Err(Error::Auth(format!(
                "environment variable '{env_var}' not set or not valid UTF-8"
            ))),
        };
    }

    Err(Error::Auth(
        "no API key configured: set 'key', 'env' or 'none' in the provider's auth".into(),
    ))
}
