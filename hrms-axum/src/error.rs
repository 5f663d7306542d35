use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hrms_auth::AuthError;
use hrms_core::HrError;

/// Error returned by handlers; renders as `{ message }` with the kind's status.
#[derive(Debug)]
pub struct ApiError(pub HrError);

impl From<HrError> for ApiError {
    fn from(e: HrError) -> Self {
        Self(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self(e.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self(HrError::normalize(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.kind.is_server_error() {
            tracing::error!(error = %err, source = ?err.source, "request failed");
        } else {
            tracing::debug!(error = %err, "request rejected");
        }

        let status = StatusCode::from_u16(err.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(err.to_json())).into_response()
    }
}
