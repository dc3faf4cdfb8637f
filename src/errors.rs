use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::Envelope;

const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Not found")]
    NotFound,
    #[error("The stored data has an unexpected shape: {0}")]
    StoreShape(String),
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn custom_internal(message: &str) -> Self {
        Self::Unexpected(message.to_owned())
    }

    pub fn missing(field: &'static str) -> Self {
        Self::MissingFields(vec![field])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound | Self::ActivityNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::StoreShape(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response envelope. Server side failures only
    /// expose a generic text, the detail goes to the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::StoreShape(_) | Self::Unexpected(_) => GENERIC_FAILURE.to_owned(),
            _ => self.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::StoreShape(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Envelope::failure(self.public_message())).into_response()
    }
}
