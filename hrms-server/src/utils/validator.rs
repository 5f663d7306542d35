use hrms_core::{bail_hr, HrResult};
use validator::Validate;

/// Every field must be present and not blank.
pub fn require_fields(fields: &[Option<&str>]) -> HrResult<()> {
    if fields
        .iter()
        .any(|f| f.map(|v| v.trim().is_empty()).unwrap_or(true))
    {
        bail_hr!(validation, "Missing required fields");
    }
    Ok(())
}

/// A supplied value must not be blank; an omitted one is fine.
pub fn require_non_empty(field: &str, v: Option<&str>) -> HrResult<()> {
    if let Some(v) = v {
        if v.trim().is_empty() {
            bail_hr!(validation, "'{}' must not be empty", field);
        }
    }
    Ok(())
}

/// Run `validator` rules, reporting the first failure by field name.
pub fn check<T: Validate>(input: &T) -> HrResult<()> {
    let Err(errors) = input.validate() else {
        return Ok(());
    };

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    let message = fields
        .first()
        .and_then(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("'{field}' is invalid"))
            })
        })
        .unwrap_or_else(|| "Validation failed".to_string());
    bail_hr!(validation, message)
}
