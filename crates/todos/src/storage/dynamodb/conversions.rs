//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, SecondsFormat, Utc};
use todos_core::storage::RepositoryError;
use todos_core::todo::TodoItem;
use uuid::Uuid;

use super::keys;

/// Convert a TodoItem to a DynamoDB item.
///
/// `attachmentUrl` is derived at read time and never written.
pub fn todo_to_item(todo: &TodoItem) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        keys::USER_ID.to_string(),
        AttributeValue::S(todo.user_id.clone()),
    );
    item.insert(
        keys::DUE_DATE.to_string(),
        AttributeValue::S(todo.due_date.clone()),
    );
    item.insert(
        keys::TODO_ID.to_string(),
        AttributeValue::S(todo.todo_id.to_string()),
    );

    // Data
    item.insert(
        keys::CREATED_AT.to_string(),
        AttributeValue::S(todo.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    );
    item.insert(keys::NAME.to_string(), AttributeValue::S(todo.name.clone()));
    item.insert(keys::DONE.to_string(), AttributeValue::Bool(todo.done));

    item
}

/// Convert a DynamoDB item to a TodoItem.
pub fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<TodoItem, RepositoryError> {
    Ok(TodoItem {
        user_id: get_string(item, keys::USER_ID)?,
        todo_id: get_uuid(item, keys::TODO_ID)?,
        created_at: get_datetime(item, keys::CREATED_AT)?,
        name: get_string(item, keys::NAME)?,
        due_date: get_string(item, keys::DUE_DATE)?,
        done: get_bool(item, keys::DONE).unwrap_or(false),
        attachment_url: None,
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional boolean attribute.
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Option<bool> {
    item.get(key).and_then(|v| v.as_bool().ok()).copied()
}

/// Get a required UUID attribute.
fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
