mod app;
pub mod config;
pub mod services;
mod utils;

use std::sync::Arc;

use axum::{Json, Router};
use hrms_axum::{protect, AxumApp};
use serde_json::{json, Value};

pub use app::hrms_state;
pub use services::HrmsState;

/// Assemble the HTTP surface.
///
/// `GET /` and `/api/auth/*` are public; employees, teams and logs sit
/// behind the access gate.
pub fn build(state: HrmsState) -> AxumApp {
    let svcs = services::configure(&state);

    let tenant_api = Router::new()
        .nest("/employees", services::employees::router(svcs.employees))
        .nest("/teams", services::teams::router(svcs.teams))
        .nest("/logs", services::logs::router(svcs.logs));

    let api = protect(tenant_api, Arc::clone(&state.codec))
        .nest("/auth", services::auth::router(svcs.auth));

    AxumApp::new()
        .use_get("/", health)
        .use_router("/api", api)
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "HRMS API running" }))
}
