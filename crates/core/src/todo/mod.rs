mod error;
mod operations;
mod requests;
mod types;

pub use error::TodoError;
pub use operations::{
    validate_create_request, validate_todo_fields, validate_update_request, MAX_NAME_LEN,
};
pub use requests::{CreateTodoRequest, UpdateTodoRequest};
pub use types::{TodoItem, TodoKey, TodoUpdate};
