use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a [`LobbyError`], also used as the `kind` field on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Forbidden,
    NotFound,
    LobbyFull,
    AlreadyMember,
    InvalidRequest,
    Unauthorized,
    RateLimited,
    Transport,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Lobby not found")]
    NotFound,
    #[error("Lobby is full")]
    LobbyFull,
    #[error("Player is already a member of this lobby")]
    AlreadyMember,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Missing or unknown player identity")]
    Unauthorized,
    #[error("Rate limited")]
    RateLimited,
    #[error("Transport: {0}")]
    Transport(String),
    #[error("Unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

pub type Result<T, E = LobbyError> = std::result::Result<T, E>;

/// Error payload returned by the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

impl LobbyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LobbyError::Forbidden(_) => ErrorKind::Forbidden,
            LobbyError::NotFound => ErrorKind::NotFound,
            LobbyError::LobbyFull => ErrorKind::LobbyFull,
            LobbyError::AlreadyMember => ErrorKind::AlreadyMember,
            LobbyError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            LobbyError::Unauthorized => ErrorKind::Unauthorized,
            LobbyError::RateLimited => ErrorKind::RateLimited,
            LobbyError::Transport(_) => ErrorKind::Transport,
            LobbyError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// Forbidden and NotFound on a lobby fetch mean the caller is no longer a member.
    pub fn means_membership_lost(&self) -> bool {
        matches!(self.kind(), ErrorKind::Forbidden | ErrorKind::NotFound)
    }

    /// Message carried on the wire, without the display prefix
    fn detail(&self) -> String {
        match self {
            LobbyError::Forbidden(reason) | LobbyError::InvalidRequest(reason) => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::LobbyFull | ErrorKind::AlreadyMember => StatusCode::CONFLICT,
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Transport | ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Rebuild an error from an HTTP error response.
    /// Falls back to the status code when the body could not be decoded.
    pub fn from_response(status: u16, body: Option<ErrorBody>) -> Self {
        let Some(body) = body else {
            return match status {
                401 => LobbyError::Unauthorized,
                403 => LobbyError::Forbidden(String::new()),
                404 => LobbyError::NotFound,
                429 => LobbyError::RateLimited,
                _ => LobbyError::Unexpected {
                    status,
                    message: String::new(),
                },
            };
        };

        match body.kind {
            ErrorKind::Forbidden => LobbyError::Forbidden(body.message),
            ErrorKind::NotFound => LobbyError::NotFound,
            ErrorKind::LobbyFull => LobbyError::LobbyFull,
            ErrorKind::AlreadyMember => LobbyError::AlreadyMember,
            ErrorKind::InvalidRequest => LobbyError::InvalidRequest(body.message),
            ErrorKind::Unauthorized => LobbyError::Unauthorized,
            ErrorKind::RateLimited => LobbyError::RateLimited,
            ErrorKind::Transport | ErrorKind::Unexpected => LobbyError::Unexpected {
                status,
                message: body.message,
            },
        }
    }
}

impl From<reqwest::Error> for LobbyError {
    fn from(err: reqwest::Error) -> Self {
        LobbyError::Transport(err.to_string())
    }
}

impl IntoResponse for LobbyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            kind: self.kind(),
            message: self.detail(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
