use hrms_core::HrError;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Database operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// True when the database rejected a write on a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::Sqlx(sqlx::Error::Database(db)) if db.is_unique_violation())
    }
}

impl From<StoreError> for HrError {
    fn from(err: StoreError) -> Self {
        if err.is_unique_violation() {
            return HrError::conflict("Duplicate value").with_source(err);
        }
        HrError::persistence(err.to_string()).with_source(err)
    }
}
