//! In-memory storage backend for testing and local development.
//!
//! This module provides in-memory implementations of `TodoRepository` and
//! `AttachmentStore` that keep all data in collections wrapped in
//! `Arc<RwLock<_>>`. Clones share the same data.
//!
//! # Example
//!
//! ```rust,ignore
//! use todos::storage::inmemory::{InMemoryAttachmentStore, InMemoryRepository};
//!
//! let repo = InMemoryRepository::new();
//! let attachments = InMemoryAttachmentStore::default();
//! ```

mod repository;

pub use repository::{InMemoryAttachmentStore, InMemoryRepository};
