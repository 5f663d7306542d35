//! Row types and the JSON shapes served to clients.
//!
//! Rows decode straight from sqlx (`FromRow`); everything that leaves the
//! process serializes with camelCase field names.

use std::fmt;

use chrono::{DateTime, Utc};
use hrms_core::Role;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Database row for the users table. Never serialized: it holds the hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn role(&self) -> StoreResult<Role> {
        parse_role(&self.role)
    }

    pub fn profile(&self) -> StoreResult<UserProfile> {
        Ok(UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role()?,
            organization_id: self.organization_id,
        })
    }
}

fn parse_role(raw: &str) -> StoreResult<Role> {
    raw.parse::<Role>()
        .map_err(|_| StoreError::Corrupt(format!("unknown role '{raw}'")))
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub organization_id: i64,
}

/// Insert payload for a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeWithTeams {
    #[serde(flatten)]
    pub employee: Employee,
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamWithMembers {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<Employee>,
}

/// Audit action tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    OrgRegister,
    UserLogin,
    EmployeeCreate,
    EmployeeUpdate,
    EmployeeDelete,
    EmployeeTeamAssign,
    TeamCreate,
    TeamUpdate,
    TeamDelete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::OrgRegister => "ORG_REGISTER",
            AuditAction::UserLogin => "USER_LOGIN",
            AuditAction::EmployeeCreate => "EMPLOYEE_CREATE",
            AuditAction::EmployeeUpdate => "EMPLOYEE_UPDATE",
            AuditAction::EmployeeDelete => "EMPLOYEE_DELETE",
            AuditAction::EmployeeTeamAssign => "EMPLOYEE_TEAM_ASSIGN",
            AuditAction::TeamCreate => "TEAM_CREATE",
            AuditAction::TeamUpdate => "TEAM_UPDATE",
            AuditAction::TeamDelete => "TEAM_DELETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Organization,
    User,
    Employee,
    Team,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Organization => "ORGANIZATION",
            EntityType::User => "USER",
            EntityType::Employee => "EMPLOYEE",
            EntityType::Team => "TEAM",
        }
    }
}

/// Insert payload for one audit record.
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub organization_id: Option<i64>,
    pub user_id: Option<i64>,
    pub action: AuditAction,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<i64>,
    pub message: String,
    pub meta: Option<Value>,
}

/// Audit row joined with its acting user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct AuditLogRow {
    pub id: i64,
    pub organization_id: Option<i64>,
    pub user_id: Option<i64>,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub message: String,
    pub meta: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_role: Option<String>,
    pub user_organization_id: Option<i64>,
}

impl AuditLogRow {
    pub(crate) fn into_entry(self) -> StoreResult<AuditLogEntry> {
        let meta = self
            .meta
            .as_deref()
            .map(|raw| serde_json::from_str::<Value>(raw))
            .transpose()?;

        let user = match (
            self.user_id,
            self.user_name,
            self.user_email,
            self.user_role,
            self.user_organization_id,
        ) {
            (Some(id), Some(name), Some(email), Some(role), Some(organization_id)) => {
                Some(UserProfile {
                    id,
                    email,
                    name,
                    role: parse_role(&role)?,
                    organization_id,
                })
            }
            _ => None,
        };

        Ok(AuditLogEntry {
            id: self.id,
            organization_id: self.organization_id,
            user_id: self.user_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            message: self.message,
            meta,
            created_at: self.created_at,
            user,
        })
    }
}

/// An audit record as served by the log listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: i64,
    pub organization_id: Option<i64>,
    pub user_id: Option<i64>,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub message: String,
    pub meta: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub user: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tags_match_their_serde_names() {
        for action in [
            AuditAction::OrgRegister,
            AuditAction::EmployeeTeamAssign,
            AuditAction::TeamDelete,
        ] {
            assert_eq!(serde_json::to_value(action).unwrap(), action.as_str());
        }
        assert_eq!(
            serde_json::to_value(EntityType::Organization).unwrap(),
            "ORGANIZATION"
        );
    }

    #[test]
    fn employee_read_flattens_and_uses_camel_case() {
        let now = Utc::now();
        let read = EmployeeWithTeams {
            employee: Employee {
                id: 1,
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                email: "jane@acme.com".into(),
                position: "Engineer".into(),
                organization_id: 7,
                created_at: now,
                updated_at: now,
            },
            teams: vec![],
        };
        let json = serde_json::to_value(&read).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["organizationId"], 7);
        assert!(json["teams"].as_array().unwrap().is_empty());
        assert!(json.get("employee").is_none());
    }
}
