//! Error codes for the tracker client.
//!
//! Every `AppError` carries one of these codes. They appear in user-visible
//! notifications and structured logs, so add new codes here rather than
//! passing ad-hoc strings around.
//!
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes for the tracker client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Selection & Submission
    /// Choice text was not rock, paper or scissors
    InvalidChoice,
    /// Player name matched several roster entries
    AmbiguousPlayer,
    /// Submission attempted while ineligible
    NotEligible,
    /// Submission already in flight
    SubmitInFlight,
    /// Selection change rejected while submitting
    ControllerBusy,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Player not found in the roster
    PlayerNotFound,
    /// Game not found on the service
    GameNotFound,
    /// General not found error
    NotFound,

    // Game Service
    /// Request never produced a response
    Transport,
    /// Request timed out
    Timeout,
    /// Service rejected the request (4xx)
    UpstreamRejected,
    /// Service failed (5xx)
    UpstreamUnavailable,
    /// Response body did not match the expected shape
    MalformedResponse,

    // System Errors
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Selection & Submission
            Self::InvalidChoice => "INVALID_CHOICE",
            Self::AmbiguousPlayer => "AMBIGUOUS_PLAYER",
            Self::NotEligible => "NOT_ELIGIBLE",
            Self::SubmitInFlight => "SUBMIT_IN_FLIGHT",
            Self::ControllerBusy => "CONTROLLER_BUSY",
            Self::ValidationError => "VALIDATION_ERROR",

            // Resource Not Found
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Game Service
            Self::Transport => "TRANSPORT",
            Self::Timeout => "TIMEOUT",
            Self::UpstreamRejected => "UPSTREAM_REJECTED",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::MalformedResponse => "MALFORMED_RESPONSE",

            // System Errors
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
