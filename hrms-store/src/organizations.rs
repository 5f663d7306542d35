//! Organizations and the credential store.

use chrono::Utc;
use tracing::debug;

use crate::models::{NewUser, Organization, UserRow};
use crate::pool::Db;
use crate::StoreResult;

/// Repository for organizations and their users
#[derive(Debug, Clone)]
pub struct OrganizationRepo {
    db: Db,
}

impl OrganizationRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create an organization together with its first user, atomically.
    ///
    /// A duplicate email surfaces as a unique violation
    /// (see [`StoreError::is_unique_violation`](crate::StoreError::is_unique_violation))
    /// and leaves no organization behind.
    pub async fn register(
        &self,
        org_name: &str,
        admin: NewUser,
    ) -> StoreResult<(Organization, UserRow)> {
        let now = Utc::now();
        let mut tx = self.db.begin().await?;

        let org = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, created_at)
            VALUES (?, ?)
            RETURNING id, name, created_at
            "#,
        )
        .bind(org_name)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash, role, organization_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, email, password_hash, role, organization_id, created_at
            "#,
        )
        .bind(&admin.name)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.role.as_str())
        .bind(org.id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(org_id = org.id, user_id = user.id, "organization registered");
        Ok((org, user))
    }

    /// Users are looked up by email across all organizations.
    pub async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, organization_id, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner())
        .await?;
        Ok(user)
    }

    pub async fn count_organizations(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM organizations")
            .fetch_one(self.db.inner())
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrms_core::Role;

    fn admin(email: &str) -> NewUser {
        NewUser {
            name: "Admin".into(),
            email: email.into(),
            password_hash: "$2b$04$hash".into(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn register_creates_org_and_admin() {
        let repo = OrganizationRepo::new(Db::in_memory().await.unwrap());
        let (org, user) = repo.register("Acme", admin("a@acme.com")).await.unwrap();
        assert_eq!(org.name, "Acme");
        assert_eq!(user.organization_id, org.id);
        assert_eq!(user.role().unwrap(), Role::Admin);

        let found = repo.find_user_by_email("a@acme.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.find_user_by_email("b@acme.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_rolls_back_the_organization() {
        let repo = OrganizationRepo::new(Db::in_memory().await.unwrap());
        repo.register("Acme", admin("a@acme.com")).await.unwrap();

        let err = repo.register("Other", admin("a@acme.com")).await.unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(repo.count_organizations().await.unwrap(), 1);
    }
}
