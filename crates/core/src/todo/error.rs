use thiserror::Error;

/// Errors that can occur when validating a to-do item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Todo name cannot be empty")]
    EmptyName,
    #[error("Todo name too long (max {max} characters)")]
    NameTooLong { max: usize },
    #[error("Todo due date cannot be empty")]
    EmptyDueDate,
}
