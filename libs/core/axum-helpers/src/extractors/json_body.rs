//! JSON body extractor that answers malformed input with `400 {"message": ...}`.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::Json`] on the request side.
///
/// Syntax errors, type mismatches and a missing `Content-Type: application/json`
/// header all reject with [`AppError::JsonExtractorRejection`], i.e. status 400
/// and the standard error body. Schema rules beyond the shape of the JSON are
/// left to the handler.
///
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<CreateProduct>) -> String {
///     format!("{:?}", input)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
