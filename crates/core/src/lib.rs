//! Functional core for the todos backend.
//!
//! Pure domain types, validation and storage contracts. Nothing in this crate
//! performs I/O; the `todos` binary provides the storage implementations.

pub mod storage;
pub mod todo;
