//! API client error types

use std::fmt;

/// Errors that can occur while talking to the operadoras API
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Base URL could not be combined with the endpoint path
    InvalidUrl(String),
    /// Connection, DNS, TLS or timeout failure
    Network(String),
    /// Server answered with a non-success status
    Status { status: u16, message: String },
    /// Response body was not the expected JSON
    Decode(String),
}

impl ApiError {
    /// True for a 404 from the server
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Build a status error from a response body
    ///
    /// FastAPI puts the human-readable reason in `{"detail": "..."}`; fall back
    /// to the raw body, then to the status line.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from));

        let message = match detail {
            Some(d) if !d.is_empty() => d,
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => format!("HTTP {}", status),
        };

        Self::Status { status, message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::Decode(msg) => write!(f, "Failed to parse response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}
