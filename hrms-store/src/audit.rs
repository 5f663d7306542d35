//! The append-only audit trail.

use chrono::Utc;

use crate::models::{AuditLogEntry, AuditLogRow, NewAuditLog};
use crate::pool::Db;
use crate::StoreResult;

/// Repository for audit records. There is no update or delete.
#[derive(Debug, Clone)]
pub struct AuditRepo {
    db: Db,
}

impl AuditRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Append one record and return its id.
    pub async fn insert(&self, entry: &NewAuditLog) -> StoreResult<i64> {
        let meta = entry.meta.as_ref().map(serde_json::to_string).transpose()?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO audit_logs
                (organization_id, user_id, action, entity_type, entity_id, message, meta, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(entry.organization_id)
        .bind(entry.user_id)
        .bind(entry.action.as_str())
        .bind(entry.entity_type.map(|t| t.as_str()))
        .bind(entry.entity_id)
        .bind(&entry.message)
        .bind(meta)
        .bind(Utc::now())
        .fetch_one(self.db.inner())
        .await?;
        Ok(id)
    }

    /// Newest records of one organization first, optionally for one action.
    pub async fn list(
        &self,
        org_id: i64,
        action: Option<&str>,
        limit: i64,
    ) -> StoreResult<Vec<AuditLogEntry>> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT a.id, a.organization_id, a.user_id, a.action, a.entity_type, a.entity_id,
                   a.message, a.meta, a.created_at,
                   u.name AS user_name, u.email AS user_email, u.role AS user_role,
                   u.organization_id AS user_organization_id
            FROM audit_logs a
            LEFT JOIN users u ON u.id = a.user_id
            WHERE a.organization_id = ?
            AND (? IS NULL OR a.action = ?)
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT ?
            "#,
        )
        .bind(org_id)
        .bind(action)
        .bind(action)
        .bind(limit)
        .fetch_all(self.db.inner())
        .await?;

        rows.into_iter().map(AuditLogRow::into_entry).collect()
    }
}
