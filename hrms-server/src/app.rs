use anyhow::Result;
use hrms_store::Db;

use crate::config::AppSettings;
use crate::services::HrmsState;

/// Open the database and assemble the shared state from settings.
pub async fn hrms_state(settings: &AppSettings) -> Result<HrmsState> {
    let db = Db::connect(&settings.database_url, settings.db_max_connections).await?;
    HrmsState::new(db, &settings.auth)
}
