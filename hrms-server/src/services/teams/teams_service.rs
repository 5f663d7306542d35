use async_trait::async_trait;
use hrms_core::{HrResult, NoParams, ServiceCapabilities, TenantContext, TenantService};
use hrms_store::{AuditAction, EntityType, TeamRepo, TeamWithMembers};

use super::teams_shared::{self, TeamInput};
use crate::services::audit::{tenant_entry, AuditWriter};
use crate::services::HrmsState;

pub struct TeamsService {
    repo: TeamRepo,
    audit: AuditWriter,
}

impl TeamsService {
    pub fn new(state: &HrmsState) -> Self {
        Self {
            repo: TeamRepo::new(state.db.clone()),
            audit: state.audit.clone(),
        }
    }
}

#[async_trait]
impl TenantService<TeamInput, TeamWithMembers> for TeamsService {
    fn capabilities(&self) -> ServiceCapabilities {
        teams_shared::crud_capabilities()
    }

    async fn find(&self, ctx: &TenantContext, _params: NoParams) -> HrResult<Vec<TeamWithMembers>> {
        Ok(self.repo.list(ctx.org_id()).await?)
    }

    async fn get(&self, ctx: &TenantContext, id: i64) -> HrResult<TeamWithMembers> {
        self.repo
            .get(ctx.org_id(), id)
            .await?
            .ok_or_else(teams_shared::not_found)
    }

    async fn create(&self, ctx: &TenantContext, data: TeamInput) -> HrResult<TeamWithMembers> {
        let team = self.repo.create(ctx.org_id(), data.into_new()?).await?;

        self.audit
            .record(tenant_entry(
                ctx,
                AuditAction::TeamCreate,
                EntityType::Team,
                team.id,
                format!("Team \"{}\" created", team.name),
            ))
            .await;

        Ok(TeamWithMembers {
            team,
            members: Vec::new(),
        })
    }

    async fn update(&self, ctx: &TenantContext, id: i64, data: TeamInput) -> HrResult<TeamWithMembers> {
        let patch = data.into_patch()?;
        let updated = self
            .repo
            .update(ctx.org_id(), id, patch)
            .await?
            .ok_or_else(teams_shared::not_found)?;

        self.audit
            .record(tenant_entry(
                ctx,
                AuditAction::TeamUpdate,
                EntityType::Team,
                updated.id,
                format!("Team {} updated", updated.id),
            ))
            .await;

        self.get(ctx, updated.id).await
    }

    async fn remove(&self, ctx: &TenantContext, id: i64) -> HrResult<()> {
        if !self.repo.delete(ctx.org_id(), id).await? {
            return Err(teams_shared::not_found());
        }

        self.audit
            .record(tenant_entry(
                ctx,
                AuditAction::TeamDelete,
                EntityType::Team,
                id,
                format!("Team {id} deleted"),
            ))
            .await;
        Ok(())
    }
}
