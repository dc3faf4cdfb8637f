use axum::{
    extract::FromRequest,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub type AppResult<T> = std::result::Result<Envelope<T>, AppError>;

/// `{error, data}` wrapper shared by every JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub error: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { error: false, data }
    }

    pub fn response(data: T) -> AppResult<T> {
        Ok(Self::ok(data))
    }
}

impl Envelope<String> {
    pub fn failure(message: String) -> Self {
        Self {
            error: true,
            data: message,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
