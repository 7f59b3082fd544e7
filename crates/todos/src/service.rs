//! To-do business logic.
//!
//! Validates requests, stamps new items with an id and creation time, and
//! enriches listings with attachment download URLs. Errors are returned as
//! `anyhow::Error` wrapping either a `TodoError` or a `RepositoryError`; the
//! HTTP layer downcasts them to pick a status code.

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use todos_core::storage::{AttachmentStore, RepositoryError, TodoRepository};
use todos_core::todo::{
    validate_create_request, validate_update_request, CreateTodoRequest, TodoItem,
    UpdateTodoRequest,
};

use crate::access::TodoAccess;

#[derive(Clone)]
pub struct TodoService {
    access: TodoAccess,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoRepository>, attachments: Arc<dyn AttachmentStore>) -> Self {
        Self {
            access: TodoAccess::new(todos, attachments),
        }
    }

    /// Lists the caller's items, newest due date first.
    ///
    /// Items with an uploaded attachment carry a download URL. Attachments are
    /// checked one item at a time.
    pub async fn list_todos(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let items = self.access.list_items_for_user(user_id).await?;

        let mut enriched = Vec::with_capacity(items.len());
        for item in items {
            let item = match self.access.issue_download_url(item.todo_id).await {
                Ok(url) => item.with_attachment_url(url),
                Err(e) if e.is_not_found() => item,
                Err(e) => return Err(e.into()),
            };
            enriched.push(item);
        }
        Ok(enriched)
    }

    pub async fn create_todo(&self, user_id: &str, request: CreateTodoRequest) -> Result<TodoItem> {
        validate_create_request(&request)?;
        let item = self.access.create_item(request.into_item(user_id)).await?;
        Ok(item)
    }

    /// Deletes an item. Deleting an unknown id succeeds.
    pub async fn delete_todo(&self, user_id: &str, todo_id: Uuid) -> Result<()> {
        if self.access.delete_item(todo_id, user_id).await?.is_none() {
            tracing::debug!(%todo_id, "delete of unknown todo ignored");
        }
        Ok(())
    }

    /// Replaces name, due date and done flag. Updating an unknown id succeeds
    /// and returns `None`.
    pub async fn update_todo(
        &self,
        user_id: &str,
        todo_id: Uuid,
        request: UpdateTodoRequest,
    ) -> Result<Option<TodoItem>> {
        validate_update_request(&request)?;
        let updated = self
            .access
            .update_item(todo_id, user_id, &request.into())
            .await?;
        if updated.is_none() {
            tracing::debug!(%todo_id, "update of unknown todo ignored");
        }
        Ok(updated)
    }

    /// Issues an attachment upload URL. Fails with `NotFound` for unknown ids.
    pub async fn request_upload_url(&self, user_id: &str, todo_id: Uuid) -> Result<String> {
        self.access
            .issue_upload_url(todo_id, user_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::NotFound {
                    entity_type: "TodoItem",
                    id: todo_id.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::s3::testing::store_answering;
    use crate::storage::{InMemoryAttachmentStore, InMemoryRepository};
    use chrono::Utc;
    use todos_core::todo::TodoError;

    fn service() -> (TodoService, InMemoryAttachmentStore) {
        let attachments = InMemoryAttachmentStore::default();
        let service = TodoService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(attachments.clone()),
        );
        (service, attachments)
    }

    fn buy_milk() -> CreateTodoRequest {
        CreateTodoRequest::new("Buy milk", "2024-06-01")
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (service, _) = service();

        let todos = service.list_todos("u1").await.unwrap();

        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_create_stamps_new_item() {
        let (service, _) = service();
        let before = Utc::now();

        let a = service.create_todo("u1", buy_milk()).await.unwrap();
        let b = service.create_todo("u1", CreateTodoRequest::new("Other", "2024-07-01")).await.unwrap();

        assert_ne!(a.todo_id, b.todo_id);
        assert!(!a.done);
        assert_eq!(a.user_id, "u1");
        assert!(a.created_at >= before && a.created_at <= Utc::now());
        assert!(a.attachment_url.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let (service, _) = service();

        let err = service
            .create_todo("u1", CreateTodoRequest::new("  ", "2024-06-01"))
            .await
            .unwrap_err();

        assert_eq!(err.downcast_ref::<TodoError>(), Some(&TodoError::EmptyName));
        assert!(service.list_todos("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_list_returns_item_without_attachment() {
        let (service, _) = service();
        let created = service.create_todo("u1", buy_milk()).await.unwrap();

        let todos = service.list_todos("u1").await.unwrap();

        assert_eq!(todos, vec![created]);
        assert!(service.list_todos("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_succeeds() {
        let (service, _) = service();

        service.delete_todo("u1", Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_item() {
        let (service, _) = service();
        let created = service.create_todo("u1", buy_milk()).await.unwrap();

        service.delete_todo("u1", created.todo_id).await.unwrap();

        assert!(service.list_todos("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_succeeds() {
        let (service, _) = service();

        let updated = service
            .update_todo(
                "u1",
                Uuid::new_v4(),
                UpdateTodoRequest {
                    name: "X".to_string(),
                    due_date: "2024-01-01".to_string(),
                    done: true,
                },
            )
            .await
            .unwrap();

        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_update_changes_exactly_three_fields() {
        let (service, _) = service();
        let created = service.create_todo("u1", buy_milk()).await.unwrap();

        service
            .update_todo(
                "u1",
                created.todo_id,
                UpdateTodoRequest {
                    name: "X".to_string(),
                    due_date: "2024-01-01".to_string(),
                    done: true,
                },
            )
            .await
            .unwrap();

        let todos = service.list_todos("u1").await.unwrap();
        assert_eq!(todos.len(), 1);
        let fetched = &todos[0];
        assert_eq!(fetched.name, "X");
        assert_eq!(fetched.due_date, "2024-01-01");
        assert!(fetched.done);
        assert_eq!(fetched.todo_id, created.todo_id);
        assert_eq!(fetched.user_id, created.user_id);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_rejected() {
        let (service, _) = service();
        let created = service.create_todo("u1", buy_milk()).await.unwrap();

        let err = service
            .update_todo(
                "u2",
                created.todo_id,
                UpdateTodoRequest {
                    name: "X".to_string(),
                    due_date: "2024-06-01".to_string(),
                    done: true,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotOwner { .. })
        ));
    }

    #[tokio::test]
    async fn test_upload_url_unknown_is_not_found() {
        let (service, _) = service();

        let err = service
            .request_upload_url("u1", Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_uploaded_attachment_appears_in_list() {
        let (service, attachments) = service();
        let created = service.create_todo("u1", buy_milk()).await.unwrap();

        let upload_url = service
            .request_upload_url("u1", created.todo_id)
            .await
            .unwrap();
        assert!(upload_url.contains(&created.todo_id.to_string()));
        attachments.put_object(created.todo_id).await;

        let todos = service.list_todos("u1").await.unwrap();

        let url = todos[0].attachment_url.as_deref().unwrap();
        assert!(url.contains(&created.todo_id.to_string()));
        assert!(url.contains("method=GET"));
    }

    #[tokio::test]
    async fn test_list_treats_forbidden_attachment_check_as_absent() {
        let service = TodoService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(store_answering(403)),
        );
        let created = service.create_todo("u1", buy_milk()).await.unwrap();

        let todos = service.list_todos("u1").await.unwrap();

        assert_eq!(todos, vec![created]);
    }

    #[tokio::test]
    async fn test_list_propagates_attachment_store_failures() {
        let service = TodoService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(store_answering(500)),
        );
        service.create_todo("u1", buy_milk()).await.unwrap();

        let err = service.list_todos("u1").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::QueryFailed(_))
        ));
    }
}
