//! JSON body extractor with validation.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use warden_core::error::AppError;

use crate::error::ApiError;

/// Deserializes a JSON body and runs its `validator` rules.
///
/// Malformed JSON, a wrong content type, and failed rules all reject
/// with `400`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        if let Err(errors) = value.validate() {
            let details = serde_json::to_value(&errors).unwrap_or_default();
            return Err(ApiError::from(AppError::validation("Request validation failed"))
                .with_details(details));
        }

        Ok(ValidatedJson(value))
    }
}
