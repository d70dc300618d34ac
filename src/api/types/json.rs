//! JSON extractors that reject with the API error envelope

use axum::{
    Json as AxumJson,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::ApiError;
use super::validation::format_validation_errors;

/// Wrapper around `axum::Json` whose rejections are `400 INVALID_REQUEST`
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(ApiError::bad_request(format_rejection_message(&rejection))),
        }
    }
}

fn format_rejection_message(rejection: &axum::extract::rejection::JsonRejection) -> String {
    use axum::extract::rejection::JsonRejection::*;

    match rejection {
        JsonDataError(err) => format!("invalid json data: {}", err.body_text()),
        JsonSyntaxError(_) => "invalid json syntax".to_string(),
        MissingJsonContentType(_) => {
            "missing content-type header, expected application/json".to_string()
        }
        BytesRejection(_) => "failed to read request body".to_string(),
        _ => "invalid json request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

/// JSON body that is also run through its `Validate` rules before the handler sees it
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|errors| ApiError::bad_request(format_validation_errors(&errors)))?;
        Ok(ValidatedJson(value))
    }
}
