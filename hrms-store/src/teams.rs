//! Tenant-scoped teams.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::models::{Employee, NewTeam, Team, TeamPatch, TeamWithMembers};
use crate::pool::Db;
use crate::StoreResult;

const TEAM_COLUMNS: &str = "id, name, description, organization_id, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    team_id: i64,
    #[sqlx(flatten)]
    employee: Employee,
}

/// Repository for teams
#[derive(Debug, Clone)]
pub struct TeamRepo {
    db: Db,
}

impl TeamRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn list(&self, org_id: i64) -> StoreResult<Vec<TeamWithMembers>> {
        let teams = sqlx::query_as::<_, Team>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE organization_id = ? ORDER BY id"
        ))
        .bind(org_id)
        .fetch_all(self.db.inner())
        .await?;

        let members = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT et.team_id, e.id, e.first_name, e.last_name, e.email, e.position,
                   e.organization_id, e.created_at, e.updated_at
            FROM employee_teams et
            JOIN employees e ON e.id = et.employee_id
            WHERE e.organization_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(org_id)
        .fetch_all(self.db.inner())
        .await?;

        let mut members_by_team: HashMap<i64, Vec<Employee>> = HashMap::new();
        for row in members {
            members_by_team.entry(row.team_id).or_default().push(row.employee);
        }

        Ok(teams
            .into_iter()
            .map(|team| TeamWithMembers {
                members: members_by_team.remove(&team.id).unwrap_or_default(),
                team,
            })
            .collect())
    }

    pub async fn get(&self, org_id: i64, id: i64) -> StoreResult<Option<TeamWithMembers>> {
        let team = sqlx::query_as::<_, Team>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE id = ? AND organization_id = ?"
        ))
        .bind(id)
        .bind(org_id)
        .fetch_optional(self.db.inner())
        .await?;
        let Some(team) = team else {
            return Ok(None);
        };

        let members = sqlx::query_as::<_, Employee>(
            r#"
            SELECT e.id, e.first_name, e.last_name, e.email, e.position,
                   e.organization_id, e.created_at, e.updated_at
            FROM employees e
            JOIN employee_teams et ON et.employee_id = e.id
            WHERE et.team_id = ? AND e.organization_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(id)
        .bind(org_id)
        .fetch_all(self.db.inner())
        .await?;

        Ok(Some(TeamWithMembers { team, members }))
    }

    pub async fn create(&self, org_id: i64, input: NewTeam) -> StoreResult<Team> {
        let now = Utc::now();
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            INSERT INTO teams (name, description, organization_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(org_id)
        .bind(now)
        .bind(now)
        .fetch_one(self.db.inner())
        .await?;
        Ok(team)
    }

    /// Overwrite the supplied fields. `None` when the id is not in scope.
    pub async fn update(&self, org_id: i64, id: i64, patch: TeamPatch) -> StoreResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            UPDATE teams
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                updated_at = ?
            WHERE id = ? AND organization_id = ?
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(patch.name)
        .bind(patch.description)
        .bind(Utc::now())
        .bind(id)
        .bind(org_id)
        .fetch_optional(self.db.inner())
        .await?;
        Ok(team)
    }

    /// Delete a team and the memberships pointing at it. `false` when not in scope.
    pub async fn delete(&self, org_id: i64, id: i64) -> StoreResult<bool> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM teams WHERE id = ? AND organization_id = ?",
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM employee_teams WHERE team_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM teams WHERE id = ? AND organization_id = ?")
            .bind(id)
            .bind(org_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(org_id, team_id = id, "team deleted");
        Ok(true)
    }
}
