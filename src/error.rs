use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating input, configuring the planner, or exporting results
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid trip request: {0}")]
    InvalidTrip(String),

    #[error("Unknown {field} value: {value}")]
    UnknownOption { field: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::InvalidTrip(_) => "INVALID_TRIP",
            PlannerError::UnknownOption { .. } => "UNKNOWN_OPTION",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Io(_) => "IO_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        })
    }
}

/// Failure categories reported by the remote chat-completion boundary.
///
/// The set is closed: every failure of a remote call lands in exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Unauthorized: the API key was rejected ({message})")]
    Unauthorized { message: String },

    #[error("Model unavailable (HTTP {status}): {message}")]
    ModelUnavailable { status: u16, message: String },

    #[error("Rate limited by provider{}", retry_suffix(.retry_after))]
    RateLimited { retry_after: Option<u64> },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

fn retry_suffix(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(", retry after {secs}s"))
        .unwrap_or_default()
}

/// Fieldless view of [`ChatError`], suitable for matching and display in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    ModelUnavailable,
    RateLimited,
    NetworkError,
    MalformedResponse,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::ModelUnavailable => "ModelUnavailable",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::MalformedResponse => "MalformedResponse",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ChatError::ModelUnavailable { .. } => ErrorKind::ModelUnavailable,
            ChatError::RateLimited { .. } => ErrorKind::RateLimited,
            ChatError::NetworkError(_) => ErrorKind::NetworkError,
            ChatError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Unauthorized { .. } => "UNAUTHORIZED",
            ChatError::ModelUnavailable { .. } => "MODEL_UNAVAILABLE",
            ChatError::RateLimited { .. } => "RATE_LIMITED",
            ChatError::NetworkError(_) => "NETWORK_ERROR",
            ChatError::MalformedResponse(_) => "MALFORMED_RESPONSE",
        }
    }

    /// Short remediation hint shown next to a degraded result
    pub fn hint(&self) -> &'static str {
        match self {
            ChatError::Unauthorized { .. } => {
                "Check that the API key is correct and has inference permissions."
            }
            ChatError::ModelUnavailable { .. } => {
                "The model may be temporarily unavailable. Try again later or pick another model."
            }
            ChatError::RateLimited { .. } => {
                "Free tier APIs have rate limits. Wait a moment before trying again."
            }
            ChatError::NetworkError(_) => "Check your network connection and the endpoint URL.",
            ChatError::MalformedResponse(_) => {
                "The provider answered without usable text. Try again or switch models."
            }
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "kind": self.kind(),
                "message": self.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = ChatError::Unauthorized {
            message: "bad token".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.error_code(), "UNAUTHORIZED");

        let err = ChatError::ModelUnavailable {
            status: 503,
            message: "loading".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::ModelUnavailable);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_rate_limited_display() {
        let err = ChatError::RateLimited {
            retry_after: Some(30),
        };
        assert_eq!(err.to_string(), "Rate limited by provider, retry after 30s");

        let err = ChatError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limited by provider");
    }

    #[test]
    fn test_error_payloads() {
        let payload = ChatError::NetworkError("timed out".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "NETWORK_ERROR");
        assert_eq!(payload["error"]["kind"], "network_error");

        let payload = PlannerError::InvalidTrip("end before start".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "INVALID_TRIP");
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("end before start"));
    }
}
