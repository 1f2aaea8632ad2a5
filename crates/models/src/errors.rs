use thiserror::Error;

/// Column value rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} longer than {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Non-blank and at most `max` characters.
pub(crate) fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Missing { field });
    }
    if value.chars().count() > max {
        return Err(ModelError::TooLong { field, max });
    }
    Ok(())
}
