use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do entry owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Owner identity. Partition key of the item store.
    pub user_id: String,
    /// Globally unique identifier, resolved through the secondary index.
    pub todo_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub name: String,
    /// Sort key of the item store.
    pub due_date: String,
    pub done: bool,
    /// Derived at read time from the attachment store, never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    /// Creates a new, not yet completed item with a fresh ID and the current time.
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            todo_id: Uuid::new_v4(),
            created_at: Utc::now(),
            name: name.into(),
            due_date: due_date.into(),
            done: false,
            attachment_url: None,
        }
    }

    /// Sets a specific ID for this item (useful for testing).
    pub fn with_id(mut self, todo_id: Uuid) -> Self {
        self.todo_id = todo_id;
        self
    }

    /// Sets a specific creation time (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the attachment URL.
    pub fn with_attachment_url(mut self, url: impl Into<String>) -> Self {
        self.attachment_url = Some(url.into());
        self
    }

    /// Composite primary key addressing this item in the store.
    pub fn key(&self) -> TodoKey {
        TodoKey {
            user_id: self.user_id.clone(),
            due_date: self.due_date.clone(),
        }
    }

    /// Returns true if `user_id` owns this item.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Returns a copy with the mutable fields replaced by `update`.
    ///
    /// Identity, owner and creation time are never touched.
    pub fn updated(&self, update: &TodoUpdate) -> Self {
        Self {
            name: update.name.clone(),
            due_date: update.due_date.clone(),
            done: update.done,
            attachment_url: None,
            ..self.clone()
        }
    }
}

/// The `(userId, dueDate)` pair used as the item store's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoKey {
    pub user_id: String,
    pub due_date: String,
}

impl TodoKey {
    pub fn new(user_id: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            due_date: due_date.into(),
        }
    }
}

/// The mutable projection of a [`TodoItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub name: String,
    pub due_date: String,
    pub done: bool,
}

impl TodoUpdate {
    /// Returns true if applying this update moves the item to another key.
    pub fn moves(&self, item: &TodoItem) -> bool {
        self.due_date != item.due_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> TodoItem {
        TodoItem::new("u1", "Buy milk", "2024-06-01")
            .with_id(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap())
            .with_created_at(
                DateTime::parse_from_rfc3339("2024-05-30T08:15:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
            )
    }

    #[test]
    fn test_new_item_defaults() {
        let item = TodoItem::new("u1", "Buy milk", "2024-06-01");

        assert_eq!(item.user_id, "u1");
        assert!(!item.done);
        assert!(item.attachment_url.is_none());
    }

    #[test]
    fn test_new_items_get_distinct_ids() {
        let a = TodoItem::new("u1", "a", "2024-06-01");
        let b = TodoItem::new("u1", "b", "2024-06-01");

        assert_ne!(a.todo_id, b.todo_id);
    }

    #[test]
    fn test_key_uses_owner_and_due_date() {
        let item = sample_item();

        assert_eq!(item.key(), TodoKey::new("u1", "2024-06-01"));
    }

    #[test]
    fn test_is_owned_by() {
        let item = sample_item();

        assert!(item.is_owned_by("u1"));
        assert!(!item.is_owned_by("u2"));
    }

    #[test]
    fn test_updated_only_touches_mutable_fields() {
        let item = sample_item().with_attachment_url("https://example.com/a");
        let update = TodoUpdate {
            name: "X".to_string(),
            due_date: "2024-01-01".to_string(),
            done: true,
        };

        let updated = item.updated(&update);

        assert_eq!(updated.name, "X");
        assert_eq!(updated.due_date, "2024-01-01");
        assert!(updated.done);
        assert_eq!(updated.todo_id, item.todo_id);
        assert_eq!(updated.user_id, item.user_id);
        assert_eq!(updated.created_at, item.created_at);
        assert!(updated.attachment_url.is_none());
    }

    #[test]
    fn test_update_moves_only_when_due_date_changes() {
        let item = sample_item();
        let same = TodoUpdate {
            name: "Other".to_string(),
            due_date: "2024-06-01".to_string(),
            done: true,
        };
        let moved = TodoUpdate {
            due_date: "2024-07-01".to_string(),
            ..same.clone()
        };

        assert!(!same.moves(&item));
        assert!(moved.moves(&item));
    }

    #[test]
    fn test_json_uses_camel_case_and_omits_missing_attachment() {
        let item = sample_item();
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["userId"], "u1");
        assert_eq!(json["todoId"], "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(json["dueDate"], "2024-06-01");
        assert_eq!(json["done"], false);
        assert!(json["createdAt"].as_str().unwrap().starts_with("2024-05-30T08:15:00"));
        assert!(json.get("attachmentUrl").is_none());
    }
}
