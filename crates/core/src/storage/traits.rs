use async_trait::async_trait;
use uuid::Uuid;

use crate::todo::{TodoItem, TodoUpdate};

use super::Result;

/// Repository for to-do items (the item store).
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Gets all items owned by `user_id`, latest due date first.
    async fn get_todos_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>>;

    /// Gets an item by its ID through the secondary index.
    async fn get_todo(&self, todo_id: Uuid) -> Result<Option<TodoItem>>;

    /// Stores an item, replacing any row at the same key.
    async fn create_todo(&self, item: &TodoItem) -> Result<()>;

    /// Deletes the row at `item.key()`.
    ///
    /// Fails with `NotFound` if that row no longer holds `item.todo_id`.
    async fn delete_todo(&self, item: &TodoItem) -> Result<()>;

    /// Applies `update` to the row at `item.key()` and returns the stored row.
    ///
    /// A changed due date relocates the row to its new key. Fails with
    /// `NotFound` if the row no longer holds `item.todo_id` and with
    /// `AlreadyExists` if the new key is taken.
    async fn update_todo(&self, item: &TodoItem, update: &TodoUpdate) -> Result<TodoItem>;
}

/// Object store holding one attachment per to-do item.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Issues a time-limited URL for uploading the attachment of `todo_id`.
    async fn upload_url(&self, todo_id: Uuid) -> Result<String>;

    /// Issues a time-limited URL for reading the attachment of `todo_id`.
    ///
    /// Fails with `NotFound` if no attachment has been uploaded.
    async fn download_url(&self, todo_id: Uuid) -> Result<String>;
}
