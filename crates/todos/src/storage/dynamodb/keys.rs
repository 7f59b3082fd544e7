//! DynamoDB attribute names and key construction.
//!
//! The table is keyed on `(userId HASH, dueDate RANGE)`; the secondary index
//! is keyed on `todoId` and projects every attribute.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use todos_core::todo::TodoKey;

// ============================================================================
// Attribute names
// ============================================================================

pub const USER_ID: &str = "userId";
pub const TODO_ID: &str = "todoId";
pub const CREATED_AT: &str = "createdAt";
pub const NAME: &str = "name";
pub const DUE_DATE: &str = "dueDate";
pub const DONE: &str = "done";

// ============================================================================
// Keys
// ============================================================================

/// Build the primary key map for the row at `key`.
pub fn primary_key(key: &TodoKey) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (USER_ID.to_string(), AttributeValue::S(key.user_id.clone())),
        (DUE_DATE.to_string(), AttributeValue::S(key.due_date.clone())),
    ])
}

/// Human readable form of a composite key, used in error messages.
pub fn display_key(key: &TodoKey) -> String {
    format!("{}/{}", key.user_id, key.due_date)
}
