//! Data access for to-do items and their attachments.
//!
//! `TodoAccess` composes the item store and the attachment store. Callers only
//! know `todoId`; every mutation first resolves it to the row (and so to its
//! `(userId, dueDate)` key) through the secondary index, checks ownership, and
//! then writes conditionally on the row still holding that `todoId`.

use std::sync::Arc;

use uuid::Uuid;

use todos_core::storage::{AttachmentStore, RepositoryError, Result, TodoRepository};
use todos_core::todo::{TodoItem, TodoUpdate};

#[derive(Clone)]
pub struct TodoAccess {
    todos: Arc<dyn TodoRepository>,
    attachments: Arc<dyn AttachmentStore>,
}

impl TodoAccess {
    pub fn new(todos: Arc<dyn TodoRepository>, attachments: Arc<dyn AttachmentStore>) -> Self {
        Self { todos, attachments }
    }

    pub async fn list_items_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        self.todos.get_todos_for_user(user_id).await
    }

    pub async fn find_by_todo_id(&self, todo_id: Uuid) -> Result<Option<TodoItem>> {
        self.todos.get_todo(todo_id).await
    }

    pub async fn create_item(&self, item: TodoItem) -> Result<TodoItem> {
        self.todos.create_todo(&item).await?;
        Ok(item)
    }

    /// Deletes the item. Returns the removed row, or `None` if there was none.
    pub async fn delete_item(&self, todo_id: Uuid, caller: &str) -> Result<Option<TodoItem>> {
        let Some(item) = self.resolve_owned(todo_id, caller).await? else {
            return Ok(None);
        };

        match self.todos.delete_todo(&item).await {
            Ok(()) => Ok(Some(item)),
            // Removed concurrently between the lookup and the delete.
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Applies `update`. Returns the stored row, or `None` if there was none.
    pub async fn update_item(
        &self,
        todo_id: Uuid,
        caller: &str,
        update: &TodoUpdate,
    ) -> Result<Option<TodoItem>> {
        let Some(item) = self.resolve_owned(todo_id, caller).await? else {
            return Ok(None);
        };

        match self.todos.update_todo(&item, update).await {
            Ok(updated) => Ok(Some(updated)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Issues an upload URL, or `None` if the item does not exist.
    pub async fn issue_upload_url(&self, todo_id: Uuid, caller: &str) -> Result<Option<String>> {
        match self.resolve_owned(todo_id, caller).await? {
            Some(item) => self.attachments.upload_url(item.todo_id).await.map(Some),
            None => Ok(None),
        }
    }

    /// Issues a download URL. Fails with `NotFound` when nothing was uploaded.
    pub async fn issue_download_url(&self, todo_id: Uuid) -> Result<String> {
        self.attachments.download_url(todo_id).await
    }

    async fn resolve_owned(&self, todo_id: Uuid, caller: &str) -> Result<Option<TodoItem>> {
        match self.find_by_todo_id(todo_id).await? {
            Some(item) if !item.is_owned_by(caller) => Err(RepositoryError::NotOwner {
                entity_type: "TodoItem",
                id: todo_id.to_string(),
            }),
            found => Ok(found),
        }
    }
}
