use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::presenter::{FailureKind, PresentError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("presenter not loaded: {0}")]
    PresenterNotLoaded(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PresenterNotLoaded(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::PresenterNotLoaded(_) => "PRESENTER_NOT_LOADED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PresentError> for ApiError {
    fn from(err: PresentError) -> Self {
        match (&err, err.kind()) {
            (_, FailureKind::Client) => ApiError::NotFound(err.to_string()),
            (PresentError::PresenterNotLoaded(extension), _) => {
                ApiError::PresenterNotLoaded(extension.clone())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Unmatched;

    #[test]
    fn test_present_error_mapping() {
        let err: ApiError =
            PresentError::NoAcceptableRepresentation(Unmatched::Extension("xml".into())).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ApiError = PresentError::PresenterNotLoaded("json".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(err.code(), "PRESENTER_NOT_LOADED");

        let err: ApiError = PresentError::PresenterNotFound("xml".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: ApiError = PresentError::UnableToResolveView.into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
