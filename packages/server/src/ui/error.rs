//! Translation of use case errors into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{GameError, RepositoryError, ValueObjectError},
    infrastructure::dto::http::ErrorResponseDto,
    usecase::GameUseCaseError,
};

/// Error returned by HTTP handlers; rendered as `{"error": ...}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GameUseCaseError> for ApiError {
    fn from(e: GameUseCaseError) -> Self {
        let status = match &e {
            GameUseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            GameUseCaseError::Rule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GameUseCaseError::ValueObject(_) => StatusCode::BAD_REQUEST,
            GameUseCaseError::Repository(RepositoryError::DuplicateId(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        GameUseCaseError::Rule(e).into()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(e: ValueObjectError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, message = %self.message, "request failed");
        (
            self.status,
            Json(ErrorResponseDto {
                error: self.message,
            }),
        )
            .into_response()
    }
}
