pub mod auth_service;
pub mod auth_shared;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use hrms_axum::{map_json_rejection, ApiError};

pub use auth_service::AuthService;
pub use auth_shared::{AuthResponse, LoginInput, RegisterOrgInput};

/// `POST /register-org` and `POST /login`. Both are public.
pub fn router(service: Arc<AuthService>) -> Router<()> {
    Router::new()
        .route("/register-org", post(register_org))
        .route("/login", post(login))
        .with_state(service)
}

async fn register_org(
    State(service): State<Arc<AuthService>>,
    data: Result<Json<RegisterOrgInput>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(input) = data.map_err(map_json_rejection)?;
    let res = service.register_org(input).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

async fn login(
    State(service): State<Arc<AuthService>>,
    data: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(input) = data.map_err(map_json_rejection)?;
    Ok(Json(service.login(input).await?))
}
