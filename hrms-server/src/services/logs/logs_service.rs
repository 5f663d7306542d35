use async_trait::async_trait;
use hrms_core::{HrResult, NoParams, ServiceCapabilities, TenantContext, TenantService};
use hrms_store::{AuditLogEntry, AuditRepo};

use super::log_params::LogParams;
use crate::services::HrmsState;

/// Read-only access to the caller's audit trail.
pub struct LogsService {
    repo: AuditRepo,
}

impl LogsService {
    pub fn new(state: &HrmsState) -> Self {
        Self {
            repo: AuditRepo::new(state.db.clone()),
        }
    }
}

#[async_trait]
impl TenantService<NoParams, AuditLogEntry, LogParams> for LogsService {
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::find_only()
    }

    async fn find(&self, ctx: &TenantContext, params: LogParams) -> HrResult<Vec<AuditLogEntry>> {
        Ok(self
            .repo
            .list(ctx.org_id(), params.action(), params.limit())
            .await?)
    }
}
