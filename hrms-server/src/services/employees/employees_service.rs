use async_trait::async_trait;
use hrms_core::{HrResult, NoParams, ServiceCapabilities, TenantContext, TenantService};
use hrms_store::{AuditAction, EmployeeRepo, EmployeeWithTeams, EntityType};
use serde_json::json;

use super::employees_shared::{
    self, AssignTeamsInput, AssignTeamsResult, EmployeeInput,
};
use crate::services::audit::{tenant_entry, AuditWriter};
use crate::services::HrmsState;

pub struct EmployeesService {
    repo: EmployeeRepo,
    audit: AuditWriter,
}

impl EmployeesService {
    pub fn new(state: &HrmsState) -> Self {
        Self {
            repo: EmployeeRepo::new(state.db.clone()),
            audit: state.audit.clone(),
        }
    }

    /// Replace the employee's teams with the caller's teams among `teamIds`.
    pub async fn assign_teams(
        &self,
        ctx: &TenantContext,
        id: i64,
        input: AssignTeamsInput,
    ) -> HrResult<AssignTeamsResult> {
        let requested = input.team_ids.unwrap_or_default();
        let team_ids = self
            .repo
            .replace_teams(ctx.org_id(), id, &requested)
            .await?
            .ok_or_else(employees_shared::not_found)?;

        let listed = team_ids
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let mut entry = tenant_entry(
            ctx,
            AuditAction::EmployeeTeamAssign,
            EntityType::Employee,
            id,
            format!("Employee {id} assigned to teams [{listed}]"),
        );
        entry.meta = Some(json!({ "teamIds": team_ids }));
        self.audit.record(entry).await;

        Ok(AssignTeamsResult {
            success: true,
            team_ids,
        })
    }
}

#[async_trait]
impl TenantService<EmployeeInput, EmployeeWithTeams> for EmployeesService {
    fn capabilities(&self) -> ServiceCapabilities {
        employees_shared::crud_capabilities()
    }

    async fn find(&self, ctx: &TenantContext, _params: NoParams) -> HrResult<Vec<EmployeeWithTeams>> {
        Ok(self.repo.list(ctx.org_id()).await?)
    }

    async fn get(&self, ctx: &TenantContext, id: i64) -> HrResult<EmployeeWithTeams> {
        self.repo
            .get(ctx.org_id(), id)
            .await?
            .ok_or_else(employees_shared::not_found)
    }

    async fn create(&self, ctx: &TenantContext, data: EmployeeInput) -> HrResult<EmployeeWithTeams> {
        let input = data.into_new()?;
        let employee = self.repo.create(ctx.org_id(), input).await?;

        self.audit
            .record(tenant_entry(
                ctx,
                AuditAction::EmployeeCreate,
                EntityType::Employee,
                employee.id,
                format!("Employee {} {} created", employee.first_name, employee.last_name),
            ))
            .await;

        Ok(EmployeeWithTeams {
            employee,
            teams: Vec::new(),
        })
    }

    async fn update(
        &self,
        ctx: &TenantContext,
        id: i64,
        data: EmployeeInput,
    ) -> HrResult<EmployeeWithTeams> {
        let patch = data.into_patch()?;
        let updated = self
            .repo
            .update(ctx.org_id(), id, patch)
            .await?
            .ok_or_else(employees_shared::not_found)?;

        self.audit
            .record(tenant_entry(
                ctx,
                AuditAction::EmployeeUpdate,
                EntityType::Employee,
                updated.id,
                format!("Employee {} updated", updated.id),
            ))
            .await;

        self.get(ctx, updated.id).await
    }

    async fn remove(&self, ctx: &TenantContext, id: i64) -> HrResult<()> {
        if !self.repo.delete(ctx.org_id(), id).await? {
            return Err(employees_shared::not_found());
        }

        self.audit
            .record(tenant_entry(
                ctx,
                AuditAction::EmployeeDelete,
                EntityType::Employee,
                id,
                format!("Employee {id} deleted"),
            ))
            .await;
        Ok(())
    }
}
