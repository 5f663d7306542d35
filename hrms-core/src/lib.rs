//! hrms-core: transport-agnostic building blocks for HRMS.

pub mod config;
pub mod errors;
pub mod service;
pub mod tenant;

pub use config::{HrConfig, HrConfigSnapshot};
pub use errors::{ErrorKind, HrError, HrResult};
pub use service::{NoParams, ServiceCapabilities, ServiceMethodKind, TenantService};
pub use tenant::{Role, TenantContext, TenantId};
