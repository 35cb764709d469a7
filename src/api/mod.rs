/// Rental backend API
///
/// Typed access to the endpoints the profile screen needs:
/// - `GET /users-cars?userID=` and `GET /bookings?userID=`
/// - `DELETE /cars?carID=`

pub mod client;

pub use client::ApiClient;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status, e.g. "Failed to fetch cars: Not Found"
    #[error("Failed to {action}: {reason}")]
    Status {
        action: String,
        status: u16,
        reason: String,
    },

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(action: impl Into<String>, status: StatusCode) -> Self {
        ApiError::Status {
            action: action.into(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown status").to_string(),
        }
    }
}
