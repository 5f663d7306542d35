//! # HRMS Store
//!
//! SQLite persistence for HRMS, built on sqlx.
//!
//! ## Modules
//!
//! - [`pool`] - connection pool and migrations
//! - [`models`] - row types and the JSON shapes served to clients
//! - [`organizations`] - organizations and their users
//! - [`employees`] - tenant-scoped employees and team membership
//! - [`teams`] - tenant-scoped teams
//! - [`audit`] - the append-only audit trail
//! - [`error`] - store error type
//!
//! Every repository method that reads or writes tenant data takes the
//! organization id and filters on it; a row of another organization is
//! indistinguishable from a missing one.

pub mod audit;
pub mod employees;
pub mod error;
pub mod models;
pub mod organizations;
pub mod pool;
pub mod teams;

pub use audit::AuditRepo;
pub use employees::EmployeeRepo;
pub use error::{StoreError, StoreResult};
pub use models::{
    AuditAction, AuditLogEntry, Employee, EmployeePatch, EmployeeWithTeams, EntityType,
    NewAuditLog, NewEmployee, NewTeam, NewUser, Organization, Team, TeamPatch, TeamWithMembers,
    UserProfile, UserRow,
};
pub use organizations::OrganizationRepo;
pub use pool::Db;
pub use teams::TeamRepo;
