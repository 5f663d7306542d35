use std::sync::Arc;

use hrms_auth::{AuthOptions, PasswordHasher, TokenCodec};
use hrms_store::{AuditRepo, Db};

use super::audit::AuditWriter;

/// Shared, immutable application state.
#[derive(Clone)]
pub struct HrmsState {
    pub db: Db,
    pub codec: Arc<TokenCodec>,
    pub hasher: PasswordHasher,
    pub audit: AuditWriter,
}

impl HrmsState {
    pub fn new(db: Db, auth: &AuthOptions) -> anyhow::Result<Self> {
        let codec = TokenCodec::new(auth.jwt.clone())?;
        Ok(Self {
            audit: AuditWriter::new(AuditRepo::new(db.clone())),
            hasher: PasswordHasher::new(&auth.password),
            codec: Arc::new(codec),
            db,
        })
    }
}
