//! API request types for to-do operations.
//!
//! Pure data types with no I/O. Shapes follow the JSON bodies accepted by the
//! HTTP routes.

use serde::{Deserialize, Serialize};

use super::types::{TodoItem, TodoUpdate};

/// Request payload for creating a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: String,
}

impl CreateTodoRequest {
    pub fn new(name: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            due_date: due_date.into(),
        }
    }

    /// Convert into a fresh item owned by `user_id`.
    pub fn into_item(self, user_id: impl Into<String>) -> TodoItem {
        TodoItem::new(user_id, self.name, self.due_date)
    }
}

/// Request payload for updating an item. Every field is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub name: String,
    pub due_date: String,
    pub done: bool,
}

impl From<UpdateTodoRequest> for TodoUpdate {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            name: request.name,
            due_date: request.due_date,
            done: request.done,
        }
    }
}
