use axum::{ http::StatusCode, response::{ IntoResponse, Response } };
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Invalid role: '{0}'")]
    InvalidRole(String),

    #[error("Invalid role sequence: {0}")]
    InvalidRoleSequence(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Conversation '{0}' not found")]
    NotFound(String),

    #[error("Conversation store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Inference backend unavailable: {0}")]
    InferenceUnavailable(String),

    #[error("Inference backend timed out: {0}")]
    InferenceTimeout(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChatError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::NotFound(_) => StatusCode::NOT_FOUND,
            ChatError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<redis::RedisError> for ChatError {
    fn from(err: redis::RedisError) -> Self {
        ChatError::StoreUnavailable(err.to_string())
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::InferenceTimeout(err.to_string())
        } else {
            ChatError::InferenceUnavailable(err.to_string())
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match status {
            StatusCode::NOT_FOUND => status.into_response(),
            StatusCode::BAD_REQUEST => (status, self.to_string()).into_response(),
            _ => {
                error!("Request failed: {}", self);
                (status, "Internal Server Error").into_response()
            }
        }
    }
}
