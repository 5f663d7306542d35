//! Tenant-scoped employees and team membership.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::models::{Employee, EmployeePatch, EmployeeWithTeams, NewEmployee, Team};
use crate::pool::Db;
use crate::StoreResult;

const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, position, organization_id, created_at, updated_at";

/// A team joined with the employee it was reached through.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    employee_id: i64,
    #[sqlx(flatten)]
    team: Team,
}

/// Repository for employees
#[derive(Debug, Clone)]
pub struct EmployeeRepo {
    db: Db,
}

impl EmployeeRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// All employees of the organization with their teams, by id.
    pub async fn list(&self, org_id: i64) -> StoreResult<Vec<EmployeeWithTeams>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE organization_id = ? ORDER BY id"
        ))
        .bind(org_id)
        .fetch_all(self.db.inner())
        .await?;

        let memberships = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT et.employee_id, t.id, t.name, t.description, t.organization_id, t.created_at, t.updated_at
            FROM employee_teams et
            JOIN teams t ON t.id = et.team_id
            WHERE t.organization_id = ?
            ORDER BY t.id
            "#,
        )
        .bind(org_id)
        .fetch_all(self.db.inner())
        .await?;

        let mut teams_by_employee: HashMap<i64, Vec<Team>> = HashMap::new();
        for row in memberships {
            teams_by_employee.entry(row.employee_id).or_default().push(row.team);
        }

        Ok(employees
            .into_iter()
            .map(|employee| EmployeeWithTeams {
                teams: teams_by_employee.remove(&employee.id).unwrap_or_default(),
                employee,
            })
            .collect())
    }

    pub async fn get(&self, org_id: i64, id: i64) -> StoreResult<Option<EmployeeWithTeams>> {
        let Some(employee) = self.find_scoped(org_id, id).await? else {
            return Ok(None);
        };

        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.id, t.name, t.description, t.organization_id, t.created_at, t.updated_at
            FROM teams t
            JOIN employee_teams et ON et.team_id = t.id
            WHERE et.employee_id = ? AND t.organization_id = ?
            ORDER BY t.id
            "#,
        )
        .bind(id)
        .bind(org_id)
        .fetch_all(self.db.inner())
        .await?;

        Ok(Some(EmployeeWithTeams { employee, teams }))
    }

    async fn find_scoped(&self, org_id: i64, id: i64) -> StoreResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ? AND organization_id = ?"
        ))
        .bind(id)
        .bind(org_id)
        .fetch_optional(self.db.inner())
        .await?;
        Ok(employee)
    }

    pub async fn create(&self, org_id: i64, input: NewEmployee) -> StoreResult<Employee> {
        let now = Utc::now();
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (first_name, last_name, email, position, organization_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.position)
        .bind(org_id)
        .bind(now)
        .bind(now)
        .fetch_one(self.db.inner())
        .await?;
        Ok(employee)
    }

    /// Overwrite the supplied fields. `None` when the id is not in scope.
    pub async fn update(
        &self,
        org_id: i64,
        id: i64,
        patch: EmployeePatch,
    ) -> StoreResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees
            SET first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                email = COALESCE(?, email),
                position = COALESCE(?, position),
                updated_at = ?
            WHERE id = ? AND organization_id = ?
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(patch.first_name)
        .bind(patch.last_name)
        .bind(patch.email)
        .bind(patch.position)
        .bind(Utc::now())
        .bind(id)
        .bind(org_id)
        .fetch_optional(self.db.inner())
        .await?;
        Ok(employee)
    }

    /// Delete an employee and its memberships. `false` when not in scope.
    pub async fn delete(&self, org_id: i64, id: i64) -> StoreResult<bool> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM employees WHERE id = ? AND organization_id = ?",
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM employee_teams WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM employees WHERE id = ? AND organization_id = ?")
            .bind(id)
            .bind(org_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(org_id, employee_id = id, "employee deleted");
        Ok(true)
    }

    /// Replace the employee's team set with the in-scope subset of `team_ids`.
    ///
    /// Unknown and foreign team ids are dropped and duplicates collapse.
    /// Returns the applied ids in ascending order, or `None` when the
    /// employee is not in scope.
    pub async fn replace_teams(
        &self,
        org_id: i64,
        id: i64,
        team_ids: &[i64],
    ) -> StoreResult<Option<Vec<i64>>> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM employees WHERE id = ? AND organization_id = ?",
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(&mut *tx)
        .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let valid: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM teams
            WHERE organization_id = ? AND id IN (SELECT value FROM json_each(?))
            ORDER BY id
            "#,
        )
        .bind(org_id)
        .bind(serde_json::to_string(team_ids)?)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM employee_teams
            WHERE employee_id = ?
            AND team_id IN (SELECT id FROM teams WHERE organization_id = ?)
            "#,
        )
        .bind(id)
        .bind(org_id)
        .execute(&mut *tx)
        .await?;

        for team_id in &valid {
            sqlx::query("INSERT INTO employee_teams (employee_id, team_id) VALUES (?, ?)")
                .bind(id)
                .bind(team_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        debug!(org_id, employee_id = id, teams = valid.len(), "employee teams replaced");
        Ok(Some(valid))
    }
}
