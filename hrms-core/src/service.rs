use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::{HrError, HrResult};
use crate::tenant::TenantContext;

/// Standard tenant service methods: find, get, create, update, remove.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceMethodKind {
    Find,
    Get,
    Create,
    Update,
    Remove,
}

/// Capabilities describe which methods a service exposes to the outside
/// world. Adapters (like hrms-axum) mount only allowed routes.
#[derive(Debug, Clone)]
pub struct ServiceCapabilities {
    pub allowed_methods: Vec<ServiceMethodKind>,
}

impl ServiceCapabilities {
    /// find, get, create, update, remove.
    pub fn standard_crud() -> Self {
        use ServiceMethodKind::*;
        Self {
            allowed_methods: vec![Find, Get, Create, Update, Remove],
        }
    }

    /// Read-only listing.
    pub fn find_only() -> Self {
        Self {
            allowed_methods: vec![ServiceMethodKind::Find],
        }
    }

    pub fn allows(&self, method: &ServiceMethodKind) -> bool {
        self.allowed_methods.contains(method)
    }
}

/// Query parameters of a `find` that takes none. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NoParams {}

fn not_implemented(method: &str) -> HrError {
    HrError::general(format!("Method not implemented: {method}"))
}

/// Core tenant-scoped service trait.
///
/// - `find`   → list many (optionally filtered by params)
/// - `get`    → fetch one by id
/// - `create` → create one
/// - `update` → overwrite the supplied fields of one
/// - `remove` → delete one
///
/// `D` is the input payload, `R` the record returned, `P` the query params
/// of `find`. Every method receives the caller's [`TenantContext`] and must
/// never read or touch rows of another tenant: a foreign id behaves exactly
/// like a missing one.
///
/// All methods have default implementations that fail, so a service can
/// override only what it supports.
#[async_trait]
pub trait TenantService<D, R, P = NoParams>: Send + Sync
where
    D: Send + 'static,
    R: Send + 'static,
    P: Send + 'static,
{
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::standard_crud()
    }

    async fn find(&self, _ctx: &TenantContext, _params: P) -> HrResult<Vec<R>> {
        Err(not_implemented("find"))
    }

    async fn get(&self, _ctx: &TenantContext, _id: i64) -> HrResult<R> {
        Err(not_implemented("get"))
    }

    async fn create(&self, _ctx: &TenantContext, _data: D) -> HrResult<R> {
        Err(not_implemented("create"))
    }

    async fn update(&self, _ctx: &TenantContext, _id: i64, _data: D) -> HrResult<R> {
        Err(not_implemented("update"))
    }

    async fn remove(&self, _ctx: &TenantContext, _id: i64) -> HrResult<()> {
        Err(not_implemented("remove"))
    }
}
