//! hrms-axum: Axum adapter for HRMS.
//!
//! Turns [`TenantService`](hrms_core::TenantService) implementations into
//! routers, guards them with the session-token gate and renders every
//! [`HrError`](hrms_core::HrError) as a `{ message }` body.

pub mod app;
pub mod gate;
pub mod rest;
mod error;

pub use app::AxumApp;
pub use error::ApiError;
pub use gate::{access_gate, protect, Tenant};
pub use rest::{map_json_rejection, parse_id, tenant_router};
