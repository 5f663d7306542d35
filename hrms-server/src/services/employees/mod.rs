pub mod employees_service;
pub mod employees_shared;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path},
    routing::post,
    Json, Router,
};
use hrms_axum::{map_json_rejection, parse_id, tenant_router, ApiError, Tenant};
use hrms_core::TenantService;
use hrms_store::EmployeeWithTeams;

pub use employees_service::EmployeesService;
pub use employees_shared::{AssignTeamsInput, AssignTeamsResult, EmployeeInput};

/// CRUD routes plus `POST /{id}/teams`.
pub fn router(service: Arc<EmployeesService>) -> Router<()> {
    let assign = Arc::clone(&service);
    let crud: Arc<dyn TenantService<EmployeeInput, EmployeeWithTeams>> = service;

    tenant_router(crud, "Employee").route(
        "/{id}/teams",
        post(
            move |Tenant(ctx): Tenant,
                  Path(id): Path<String>,
                  data: Result<Json<AssignTeamsInput>, JsonRejection>| async move {
                let id = parse_id(&id, "Employee")?;
                let Json(input) = data.map_err(map_json_rejection)?;
                let res = assign.assign_teams(&ctx, id, input).await?;
                Ok::<_, ApiError>(Json(res))
            },
        ),
    )
}
