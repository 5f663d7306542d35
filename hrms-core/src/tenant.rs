//! Core multi-tenant types for HRMS.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HrError;

/// An organization identifier. Organizations are the tenant boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub i64);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User role inside an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "MEMBER" => Ok(Role::Member),
            other => Err(HrError::general(format!("Unknown role: {other}"))),
        }
    }
}

/// Context carried with every tenant-scoped operation.
///
/// Built by the access gate from verified token claims and passed into
/// services, so every query can be filtered by `tenant_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub user_id: i64,
    pub role: Role,
    pub email: String,
}

impl TenantContext {
    pub fn new(tenant_id: i64, user_id: i64, role: Role, email: impl Into<String>) -> Self {
        Self {
            tenant_id: TenantId(tenant_id),
            user_id,
            role,
            email: email.into(),
        }
    }

    /// Raw organization id, for binding into queries.
    pub fn org_id(&self) -> i64 {
        self.tenant_id.0
    }
}
