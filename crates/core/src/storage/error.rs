use thiserror::Error;

/// Errors that can occur during repository and attachment store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} {id} belongs to another user")]
    NotOwner {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns true for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "TodoItem",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "TodoItem not found: abc-123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "TodoItem",
            id: "u1/2024-06-01".to_string(),
        };
        assert_eq!(error.to_string(), "TodoItem already exists: u1/2024-06-01");
    }

    #[test]
    fn test_repository_error_not_owner_display() {
        let error = RepositoryError::NotOwner {
            entity_type: "TodoItem",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "TodoItem abc-123 belongs to another user");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("invalid partition key".to_string());
        assert_eq!(error.to_string(), "Query failed: invalid partition key");
    }

    #[test]
    fn test_is_not_found() {
        let not_found = RepositoryError::NotFound {
            entity_type: "Attachment",
            id: "abc".to_string(),
        };

        assert!(not_found.is_not_found());
        assert!(!RepositoryError::InvalidData("x".to_string()).is_not_found());
    }
}
