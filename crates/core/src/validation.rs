//! Custom field validators shared by request DTOs.
//!
//! Used through `#[validate(custom(function = "..."))]` on `validator`
//! derived structs; the derive attribute supplies the user-facing message.

use std::borrow::Cow;

use validator::ValidationError;

/// Reject strings that are empty or whitespace only.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("Value must not be empty")));
    }
    Ok(())
}
