use super::error::TodoError;
use super::requests::{CreateTodoRequest, UpdateTodoRequest};

/// Maximum number of characters in a to-do name.
pub const MAX_NAME_LEN: usize = 200;

/// Validates the user-supplied fields shared by create and update.
pub fn validate_todo_fields(name: &str, due_date: &str) -> Result<(), TodoError> {
    if name.trim().is_empty() {
        return Err(TodoError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(TodoError::NameTooLong { max: MAX_NAME_LEN });
    }
    if due_date.trim().is_empty() {
        return Err(TodoError::EmptyDueDate);
    }
    Ok(())
}

/// Validates a create request.
pub fn validate_create_request(request: &CreateTodoRequest) -> Result<(), TodoError> {
    validate_todo_fields(&request.name, &request.due_date)
}

/// Validates an update request.
pub fn validate_update_request(request: &UpdateTodoRequest) -> Result<(), TodoError> {
    validate_todo_fields(&request.name, &request.due_date)
}
