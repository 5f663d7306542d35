//! Best-effort audit trail writer.

use hrms_core::TenantContext;
use hrms_store::{AuditAction, AuditRepo, EntityType, NewAuditLog};

/// Appends audit records. Never fails its caller: a write error is logged
/// and dropped.
#[derive(Debug, Clone)]
pub struct AuditWriter {
    repo: AuditRepo,
}

impl AuditWriter {
    pub fn new(repo: AuditRepo) -> Self {
        Self { repo }
    }

    pub async fn record(&self, entry: NewAuditLog) {
        match self.repo.insert(&entry).await {
            Ok(id) => tracing::info!(
                audit_id = id,
                org_id = ?entry.organization_id,
                user_id = ?entry.user_id,
                "[AUDIT] {} - {}",
                entry.action,
                entry.message
            ),
            Err(err) => tracing::error!(
                error = %err,
                action = %entry.action,
                org_id = ?entry.organization_id,
                "failed to write audit log"
            ),
        }
    }
}

/// An audit record for an action taken by `ctx` on one entity.
pub fn tenant_entry(
    ctx: &TenantContext,
    action: AuditAction,
    entity_type: EntityType,
    entity_id: i64,
    message: impl Into<String>,
) -> NewAuditLog {
    NewAuditLog {
        organization_id: Some(ctx.org_id()),
        user_id: Some(ctx.user_id),
        action,
        entity_type: Some(entity_type),
        entity_id: Some(entity_id),
        message: message.into(),
        meta: None,
    }
}
