//! In-memory repository and attachment store implementations.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use todos_core::storage::{AttachmentStore, RepositoryError, Result, TodoRepository};
use todos_core::todo::{TodoItem, TodoKey, TodoUpdate};

/// In-memory item store.
///
/// Rows are keyed on `(userId, dueDate)` exactly like the DynamoDB table, so
/// a put at an occupied key replaces the row and due date changes relocate it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    rows: Arc<RwLock<BTreeMap<TodoKey, TodoItem>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(item: &TodoItem) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "TodoItem",
        id: item.todo_id.to_string(),
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn get_todos_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|t| t.user_id == user_id)
            .rev()
            .cloned()
            .collect())
    }

    async fn get_todo(&self, todo_id: Uuid) -> Result<Option<TodoItem>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|t| t.todo_id == todo_id).cloned())
    }

    async fn create_todo(&self, item: &TodoItem) -> Result<()> {
        let mut rows = self.rows.write().await;
        let stored = TodoItem {
            attachment_url: None,
            ..item.clone()
        };
        rows.insert(item.key(), stored);
        Ok(())
    }

    async fn delete_todo(&self, item: &TodoItem) -> Result<()> {
        let mut rows = self.rows.write().await;
        let key = item.key();
        match rows.get(&key) {
            Some(row) if row.todo_id == item.todo_id => {
                rows.remove(&key);
                Ok(())
            }
            _ => Err(not_found(item)),
        }
    }

    async fn update_todo(&self, item: &TodoItem, update: &TodoUpdate) -> Result<TodoItem> {
        let mut rows = self.rows.write().await;
        let key = item.key();
        let current = match rows.get(&key) {
            Some(row) if row.todo_id == item.todo_id => row.clone(),
            _ => return Err(not_found(item)),
        };

        let updated = current.updated(update);
        let new_key = updated.key();
        if new_key != key {
            if rows.contains_key(&new_key) {
                return Err(RepositoryError::AlreadyExists {
                    entity_type: "TodoItem",
                    id: format!("{}/{}", new_key.user_id, new_key.due_date),
                });
            }
            rows.remove(&key);
        }
        rows.insert(new_key, updated.clone());
        Ok(updated)
    }
}

/// In-memory attachment store.
///
/// Issues `memory://` URLs. Nothing receives uploads, so outside tests no
/// item ever has an attachment.
#[derive(Debug, Clone)]
pub struct InMemoryAttachmentStore {
    bucket: String,
    url_expiration: Duration,
    objects: Arc<RwLock<HashSet<Uuid>>>,
}

impl Default for InMemoryAttachmentStore {
    fn default() -> Self {
        Self::new("todos-attachments", Duration::from_secs(300))
    }
}

impl InMemoryAttachmentStore {
    /// Creates a new empty store.
    pub fn new(bucket: impl Into<String>, url_expiration: Duration) -> Self {
        Self {
            bucket: bucket.into(),
            url_expiration,
            objects: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Records an uploaded attachment for `todo_id`.
    #[cfg(test)]
    pub async fn put_object(&self, todo_id: Uuid) {
        self.objects.write().await.insert(todo_id);
    }

    fn url(&self, todo_id: Uuid, method: &str) -> String {
        format!(
            "memory://{}/{}?method={}&expires={}",
            self.bucket,
            todo_id,
            method,
            self.url_expiration.as_secs()
        )
    }
}

#[async_trait]
impl AttachmentStore for InMemoryAttachmentStore {
    async fn upload_url(&self, todo_id: Uuid) -> Result<String> {
        Ok(self.url(todo_id, "PUT"))
    }

    async fn download_url(&self, todo_id: Uuid) -> Result<String> {
        if !self.objects.read().await.contains(&todo_id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Attachment",
                id: todo_id.to_string(),
            });
        }
        Ok(self.url(todo_id, "GET"))
    }
}
