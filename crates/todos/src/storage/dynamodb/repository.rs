//! DynamoDB repository implementation.
//!
//! Implements `TodoRepository` from `todos_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, ReturnValue, TransactWriteItem};
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use todos_core::storage::{RepositoryError, Result, TodoRepository};
use todos_core::todo::{TodoItem, TodoUpdate};

use super::conversions::{item_to_todo, todo_to_item};
use super::error::{
    map_build_error, map_delete_item_error, map_put_item_error, map_query_error,
    map_relocate_error, map_update_item_error,
};
use super::keys;

const ENTITY_TYPE: &str = "TodoItem";

/// DynamoDB-based repository implementation.
///
/// Items live in `table_name`, keyed on `(userId, dueDate)`. Lookups by
/// `todoId` go through `index_name`.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client, table and index names.
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            index_name: index_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Same-key update: rewrite `name` and `done` in place.
    async fn update_in_place(&self, item: &TodoItem, update: &TodoUpdate) -> Result<TodoItem> {
        let todo_id = item.todo_id.to_string();

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(keys::primary_key(&item.key())))
            .update_expression("SET #nm = :name, #done = :done")
            .condition_expression("#todoId = :todoId")
            .expression_attribute_names("#nm", keys::NAME)
            .expression_attribute_names("#done", keys::DONE)
            .expression_attribute_names("#todoId", keys::TODO_ID)
            .expression_attribute_values(":name", AttributeValue::S(update.name.clone()))
            .expression_attribute_values(":done", AttributeValue::Bool(update.done))
            .expression_attribute_values(":todoId", AttributeValue::S(todo_id.clone()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, ENTITY_TYPE, todo_id.clone()))?;

        match result.attributes {
            Some(attributes) => item_to_todo(&attributes),
            None => Err(RepositoryError::InvalidData(format!(
                "UpdateItem returned no attributes for {todo_id}"
            ))),
        }
    }

    /// Due date change: move the row to its new key in one transaction.
    async fn relocate(&self, item: &TodoItem, update: &TodoUpdate) -> Result<TodoItem> {
        let todo_id = item.todo_id.to_string();
        let moved = item.updated(update);

        let delete = Delete::builder()
            .table_name(&self.table_name)
            .set_key(Some(keys::primary_key(&item.key())))
            .condition_expression("#todoId = :todoId")
            .expression_attribute_names("#todoId", keys::TODO_ID)
            .expression_attribute_values(":todoId", AttributeValue::S(todo_id.clone()))
            .build()
            .map_err(map_build_error)?;

        let put = Put::builder()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(&moved)))
            .condition_expression("attribute_not_exists(#userId)")
            .expression_attribute_names("#userId", keys::USER_ID)
            .build()
            .map_err(map_build_error)?;

        self.client
            .transact_write_items()
            .transact_items(TransactWriteItem::builder().delete(delete).build())
            .transact_items(TransactWriteItem::builder().put(put).build())
            .send()
            .await
            .map_err(|e| {
                map_relocate_error(e, ENTITY_TYPE, todo_id, keys::display_key(&moved.key()))
            })?;

        Ok(moved)
    }
}

#[async_trait]
impl TodoRepository for DynamoDbRepository {
    async fn get_todos_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        let mut todos = Vec::new();
        let mut start_key = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("#userId = :userId")
                .expression_attribute_names("#userId", keys::USER_ID)
                .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()))
                .scan_index_forward(false)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            for item in result.items.unwrap_or_default() {
                todos.push(item_to_todo(&item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(todos)
    }

    async fn get_todo(&self, todo_id: Uuid) -> Result<Option<TodoItem>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression("#todoId = :todoId")
            .expression_attribute_names("#todoId", keys::TODO_ID)
            .expression_attribute_values(":todoId", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        match items.first() {
            Some(item) => Ok(Some(item_to_todo(item)?)),
            None => Ok(None),
        }
    }

    async fn create_todo(&self, item: &TodoItem) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, ENTITY_TYPE, item.todo_id.to_string()))?;

        Ok(())
    }

    async fn delete_todo(&self, item: &TodoItem) -> Result<()> {
        let todo_id = item.todo_id.to_string();

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(keys::primary_key(&item.key())))
            .condition_expression("#todoId = :todoId")
            .expression_attribute_names("#todoId", keys::TODO_ID)
            .expression_attribute_values(":todoId", AttributeValue::S(todo_id.clone()))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, ENTITY_TYPE, todo_id))?;

        Ok(())
    }

    async fn update_todo(&self, item: &TodoItem, update: &TodoUpdate) -> Result<TodoItem> {
        if update.moves(item) {
            self.relocate(item, update).await
        } else {
            self.update_in_place(item, update).await
        }
    }
}
