//! Application state shared by all request handlers.

use std::sync::Arc;

use todos_core::storage::{AttachmentStore, TodoRepository};

use crate::config::Config;
use crate::service::TodoService;
use crate::storage::{aws_backends, InMemoryAttachmentStore, InMemoryRepository};

/// Shared application state.
///
/// Cloned for each request. Holds no mutable data of its own; everything
/// persistent lives behind the store trait objects.
#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
}

impl AppState {
    pub fn new(todos: Arc<dyn TodoRepository>, attachments: Arc<dyn AttachmentStore>) -> Self {
        Self {
            service: TodoService::new(todos, attachments),
        }
    }

    /// Creates AppState backed by DynamoDB and S3.
    pub async fn from_config(config: &Config) -> Self {
        let (todos, attachments) = aws_backends(config).await;
        tracing::info!(
            table = %todos.table_name(),
            bucket = %attachments.bucket(),
            "Using AWS storage backends"
        );
        Self::new(Arc::new(todos), Arc::new(attachments))
    }

    /// Creates AppState with in-memory stores sharing `attachments`.
    pub fn in_memory(attachments: InMemoryAttachmentStore) -> Self {
        Self::new(Arc::new(InMemoryRepository::new()), Arc::new(attachments))
    }
}

impl Default for AppState {
    /// Creates an AppState with empty in-memory stores.
    fn default() -> Self {
        Self::in_memory(InMemoryAttachmentStore::default())
    }
}
