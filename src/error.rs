use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Persistence,
    Unexpected,
    Network,
    MalformedResponse,
    QuotesUnavailable { attempts: u32 },
    ConfirmationFailed,
    InvalidInput,
    InsufficientData,
    NoRouteFound,
    ConfirmationRejected,
    InvalidDistance,
    DriverNotFound,
    InvalidData,
    UnknownConfirmation,
    Superseded { generation: u64 },
}

impl ErrorKind {
    /// Codes below 10 are internal, 10..=99 are upstream failures and 100+ are
    /// surfaced to the user verbatim.
    pub fn code(&self) -> i32 {
        match self {
            Self::Configuration => 1,
            Self::Persistence => 2,
            Self::Unexpected => 5,
            Self::Network => 10,
            Self::MalformedResponse => 11,
            Self::QuotesUnavailable { .. } => 12,
            Self::ConfirmationFailed => 13,
            Self::InvalidInput => 100,
            Self::InsufficientData => 101,
            Self::NoRouteFound => 102,
            Self::ConfirmationRejected => 103,
            Self::InvalidDistance => 104,
            Self::DriverNotFound => 105,
            Self::InvalidData => 106,
            Self::UnknownConfirmation => 107,
            Self::Superseded { .. } => 108,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Failures worth another attempt against the quoting backend.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Network | ErrorKind::MalformedResponse)
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.kind == ErrorKind::InvalidInput
    }

    pub fn is_persistence_error(&self) -> bool {
        self.kind == ErrorKind::Persistence
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code())
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        configuration_error(err)
    }
}

/// Request urls carry the provider key in their query, so they never reach
/// the message.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        network_error(err.without_url())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        malformed_response_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        persistence_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code() {
            1..=9 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            10..=99 => (StatusCode::BAD_GATEWAY, self.message.as_str()),
            108 => (StatusCode::CONFLICT, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code(),
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

fn error(kind: ErrorKind, message: impl Into<String>) -> Error {
    Error {
        kind,
        message: message.into(),
    }
}

pub fn configuration_error<T: Display>(cause: T) -> Error {
    error(
        ErrorKind::Configuration,
        format!("configuration error: {}", cause),
    )
}

pub fn persistence_error<T: Display>(cause: T) -> Error {
    error(
        ErrorKind::Persistence,
        format!("trip history error: {}", cause),
    )
}

pub fn unexpected_error<T: Display>(cause: T) -> Error {
    error(ErrorKind::Unexpected, format!("unexpected error: {}", cause))
}

pub fn network_error<T: Display>(cause: T) -> Error {
    error(ErrorKind::Network, format!("network error: {}", cause))
}

pub fn malformed_response_error<T: Display>(cause: T) -> Error {
    error(
        ErrorKind::MalformedResponse,
        format!("malformed response: {}", cause),
    )
}

pub fn quotes_unavailable_error(attempts: u32) -> Error {
    error(
        ErrorKind::QuotesUnavailable { attempts },
        format!("quotes unavailable after {} attempts", attempts),
    )
}

pub fn confirmation_failed_error<T: Display>(cause: T) -> Error {
    error(
        ErrorKind::ConfirmationFailed,
        format!("failed to confirm trip: {}", cause),
    )
}

pub fn invalid_input_error(message: impl Into<String>) -> Error {
    error(ErrorKind::InvalidInput, message)
}

pub fn insufficient_data_error() -> Error {
    error(
        ErrorKind::InsufficientData,
        "insufficient data to confirm trip",
    )
}

pub fn no_route_found_error() -> Error {
    error(ErrorKind::NoRouteFound, "no route found")
}

pub fn confirmation_rejected_error() -> Error {
    error(ErrorKind::ConfirmationRejected, "trip confirmation rejected")
}

pub fn invalid_distance_error(description: impl Into<String>) -> Error {
    error(ErrorKind::InvalidDistance, description)
}

pub fn driver_not_found_error(description: impl Into<String>) -> Error {
    error(ErrorKind::DriverNotFound, description)
}

pub fn invalid_data_error(description: impl Into<String>) -> Error {
    error(ErrorKind::InvalidData, description)
}

pub fn unknown_confirmation_error(description: impl Into<String>) -> Error {
    error(ErrorKind::UnknownConfirmation, description)
}

pub fn superseded_error(generation: u64) -> Error {
    error(
        ErrorKind::Superseded { generation },
        format!("request generation {} was superseded", generation),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_and_parse_failures_are_retryable() {
        assert!(network_error("reset").is_retryable());
        assert!(malformed_response_error("missing field").is_retryable());
        assert!(!no_route_found_error().is_retryable());
        assert!(!quotes_unavailable_error(4).is_retryable());
        assert!(!confirmation_failed_error("timeout").is_retryable());
    }

    #[test]
    fn internal_errors_hide_their_message() {
        let response = persistence_error("disk full").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = driver_not_found_error("no such driver").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = quotes_unavailable_error(4).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = superseded_error(3).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
