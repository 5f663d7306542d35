use hrms_core::{HrError, HrResult, ServiceCapabilities};
use hrms_store::{NewTeam, TeamPatch};
use serde::Deserialize;

use crate::utils::validator::{require_fields, require_non_empty};

pub fn crud_capabilities() -> ServiceCapabilities {
    ServiceCapabilities::standard_crud()
}

pub fn not_found() -> HrError {
    HrError::not_found("Team not found")
}

/// Body of `POST /teams` and `PUT /teams/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TeamInput {
    pub fn into_new(self) -> HrResult<NewTeam> {
        require_fields(&[self.name.as_deref()])?;
        Ok(NewTeam {
            name: self.name.unwrap_or_default(),
            description: self.description,
        })
    }

    pub fn into_patch(self) -> HrResult<TeamPatch> {
        require_non_empty("name", self.name.as_deref())?;
        Ok(TeamPatch {
            name: self.name,
            description: self.description,
        })
    }
}
