use crate::ModelError;

use super::{TEXT_MAX_LEN, TEXT_MIN_LEN};

/// Checks a required free-text field: non-blank and within the length bounds.
///
/// Length is counted in Unicode scalars, not bytes.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(field, "must not be blank"));
    }
    let len = value.chars().count();
    if !(TEXT_MIN_LEN..=TEXT_MAX_LEN).contains(&len) {
        return Err(ModelError::validation(
            field,
            format!("must be between {TEXT_MIN_LEN} and {TEXT_MAX_LEN} characters (got {len})"),
        ));
    }
    Ok(())
}
