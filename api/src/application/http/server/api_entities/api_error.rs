use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nutriscan_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad-request",
            ApiError::NotFound(_) => "not-found",
            ApiError::BadGateway(_) => "bad-gateway",
            ApiError::ServiceUnavailable(_) => "service-unavailable",
            ApiError::InternalServerError(_) => "internal-server-error",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        let message = error.user_message();
        match error {
            CoreError::ValidationFailed(_) => ApiError::BadRequest(message),
            CoreError::ProductNotFound(_) => ApiError::NotFound(message),
            CoreError::MalformedReply(_) | CoreError::CollaboratorUnavailable(_) => {
                ApiError::BadGateway(message)
            }
            CoreError::Cancelled => ApiError::ServiceUnavailable(message),
            CoreError::MediaStorage(detail) => {
                tracing::error!("Media storage failure: {}", detail);
                ApiError::InternalServerError(message)
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(validation_message(&errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            success: false,
            code: self.code().to_string(),
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// JSON extractor that runs `validator` rules before the handler sees the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidateJson(value))
    }
}

fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<String>>();
    messages.sort();
    messages.join(", ")
}
