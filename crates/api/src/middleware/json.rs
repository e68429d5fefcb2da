//! JSON body extractor that reports rejections in the API error format.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use studyhub_core::error::CoreError;

use crate::error::AppError;

/// Drop-in replacement for [`Json`] in request position.
///
/// A well-formed body with a wrong field type (e.g. `"parentId": "abc"`) is a
/// validation failure; unparseable JSON or a missing content type is a plain
/// bad request. Both answer 400 with the `{error, code}` body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            AppError::Core(CoreError::Validation(err.body_text()))
        }
        other => AppError::BadRequest(other.body_text()),
    }
}
