use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use runtime::RunError;
use serde_json::json;
use strategy::ProfileError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Run(#[from] RunError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Profile(ProfileError::UnknownPreset(_)) => StatusCode::NOT_FOUND,
            Self::Profile(ProfileError::InvalidParameter { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Run(RunError::NoRuntime) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self, "request rejected");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ProfileError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProfileError::InvalidParameter { field })
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use runtime::RunError;
    use serde_json::Value;
    use strategy::ProfileError;

    use super::{ensure_finite, ApiError};

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite("risk_fraction", 0.02), Ok(0.02));
    }

    #[tokio::test]
    async fn non_finite_parameter_maps_to_unprocessable_entity() {
        let err = ensure_finite("risk_fraction", f64::NAN).unwrap_err();
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "risk_fraction must be a finite number");
    }

    #[test]
    fn unknown_preset_and_missing_runtime_map_to_their_statuses() {
        let not_found = ApiError::from(ProfileError::UnknownPreset("grid".to_owned()));
        let no_runtime = ApiError::from(RunError::NoRuntime);

        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            no_runtime.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
