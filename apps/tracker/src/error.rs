use thiserror::Error;

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Transport error: {detail}")]
    Transport { code: ErrorCode, detail: String },
    #[error("Game service returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("Malformed response: {detail}")]
    Decode { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Error code for any variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Transport { code, .. } => *code,
            AppError::Status { status, .. } => match *status {
                404 => ErrorCode::NotFound,
                400..=499 => ErrorCode::UpstreamRejected,
                _ => ErrorCode::UpstreamUnavailable,
            },
            AppError::Decode { .. } => ErrorCode::MalformedResponse,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Error detail for any variant
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. } => detail,
            AppError::NotFound { detail, .. } => detail,
            AppError::Transport { detail, .. } => detail,
            AppError::Status { detail, .. } => detail,
            AppError::Decode { detail } => detail,
            AppError::Config { detail } => detail,
            AppError::Internal { detail } => detail,
        }
    }

    /// Text shown to the user in a notification.
    pub fn user_message(&self) -> String {
        format!("{} ({})", self, self.code())
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            code: ErrorCode::Transport,
            detail: detail.into(),
        }
    }

    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::Transport {
            code: ErrorCode::Timeout,
            detail: detail.into(),
        }
    }

    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        Self::Status {
            status,
            detail: detail.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidChoice => ErrorCode::InvalidChoice,
                    ValidationKind::AmbiguousPlayerName => ErrorCode::AmbiguousPlayer,
                    ValidationKind::NotEligible => ErrorCode::NotEligible,
                    ValidationKind::SubmitInFlight => ErrorCode::SubmitInFlight,
                    ValidationKind::Busy => ErrorCode::ControllerBusy,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::timeout(format!("request timed out: {e}"))
        } else if e.is_decode() {
            AppError::decode(format!("response body: {e}"))
        } else if let Some(status) = e.status() {
            AppError::status(status.as_u16(), e.to_string())
        } else {
            AppError::transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::decode(format!("json: {e}"))
    }
}
