pub mod log_params;
pub mod logs_service;

use std::sync::Arc;

use axum::Router;
use hrms_axum::tenant_router;
use hrms_core::{NoParams, TenantService};
use hrms_store::AuditLogEntry;

pub use log_params::LogParams;
pub use logs_service::LogsService;

/// `GET /` only.
pub fn router(service: Arc<LogsService>) -> Router<()> {
    let logs: Arc<dyn TenantService<NoParams, AuditLogEntry, LogParams>> = service;
    tenant_router(logs, "Log")
}
