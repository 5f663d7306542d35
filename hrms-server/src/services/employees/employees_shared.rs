use hrms_core::{HrError, HrResult, ServiceCapabilities};
use hrms_store::{EmployeePatch, NewEmployee};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validator::{check, require_fields, require_non_empty};

pub fn crud_capabilities() -> ServiceCapabilities {
    ServiceCapabilities::standard_crud()
}

pub fn not_found() -> HrError {
    HrError::not_found("Employee not found")
}

/// Body of `POST /employees` and `PUT /employees/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid email"))]
    pub email: Option<String>,
    pub position: Option<String>,
}

impl EmployeeInput {
    /// All four fields are required on create.
    pub fn into_new(self) -> HrResult<NewEmployee> {
        require_fields(&[
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.position.as_deref(),
        ])?;
        check(&self)?;
        Ok(NewEmployee {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
        })
    }

    /// Omitted fields keep their stored value on update.
    pub fn into_patch(self) -> HrResult<EmployeePatch> {
        require_non_empty("firstName", self.first_name.as_deref())?;
        require_non_empty("lastName", self.last_name.as_deref())?;
        require_non_empty("email", self.email.as_deref())?;
        require_non_empty("position", self.position.as_deref())?;
        check(&self)?;
        Ok(EmployeePatch {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            position: self.position,
        })
    }
}

/// Body of `POST /employees/{id}/teams`. A missing list clears membership.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTeamsInput {
    #[serde(default)]
    pub team_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignTeamsResult {
    pub success: bool,
    pub team_ids: Vec<i64>,
}
