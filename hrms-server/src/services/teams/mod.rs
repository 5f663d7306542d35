pub mod teams_service;
pub mod teams_shared;

use std::sync::Arc;

use axum::Router;
use hrms_axum::tenant_router;
use hrms_core::TenantService;
use hrms_store::TeamWithMembers;

pub use teams_service::TeamsService;
pub use teams_shared::TeamInput;

pub fn router(service: Arc<TeamsService>) -> Router<()> {
    let crud: Arc<dyn TenantService<TeamInput, TeamWithMembers>> = service;
    tenant_router(crud, "Team")
}
