//! Environment configuration
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file at startup. The API base URL is looked up on every request
//! so a changed environment takes effect without a restart.

use reqwest::Url;
use thiserror::Error;

/// Primary variable holding the backend base URL
pub const API_BASE_URL_VAR: &str = "API_BASE_URL";
/// Name used by the web front-end, accepted as a fallback
pub const API_BASE_URL_FALLBACK_VAR: &str = "NEXT_PUBLIC_API_BASE_URL";
/// Identity handed over by the session layer
pub const USER_EMAIL_VAR: &str = "RENTAL_USER_EMAIL";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("API_BASE_URL is not set")]
    Missing,
    #[error("API_BASE_URL is not a valid URL: {0}")]
    Invalid(String),
}

/// Load `.env` if present. A missing file is not an error.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
}

/// Read and parse the API base URL from the environment
pub fn api_base_url() -> Result<Url, ConfigError> {
    select_base_url(
        std::env::var(API_BASE_URL_VAR).ok(),
        std::env::var(API_BASE_URL_FALLBACK_VAR).ok(),
    )
}

/// Pick the first non-blank of the primary and fallback values and parse it
pub fn select_base_url(primary: Option<String>, fallback: Option<String>) -> Result<Url, ConfigError> {
    let raw = primary
        .filter(|value| !value.trim().is_empty())
        .or_else(|| fallback.filter(|value| !value.trim().is_empty()))
        .ok_or(ConfigError::Missing)?;
    parse_base_url(&raw)
}

/// Parse a base URL, tolerating surrounding whitespace and a trailing slash
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Missing);
    }

    let url = Url::parse(trimmed).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid(format!("{trimmed} cannot be a base")));
    }
    Ok(url)
}

/// The identity to start with, if the session layer provided one
pub fn initial_identity() -> Option<String> {
    std::env::var(USER_EMAIL_VAR)
        .ok()
        .and_then(|value| normalize_identity(&value))
}

/// Trim an email and treat blank input as "no identity"
pub fn normalize_identity(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
