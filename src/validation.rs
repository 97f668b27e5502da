use crate::error::{PlannerError, PlannerResult};

/// Trimmed copy of `value`, or an error naming `field` when nothing is left.
pub fn require_text(value: &str, field: &'static str) -> PlannerResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Trimmed copy of an optional field; blank input becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
