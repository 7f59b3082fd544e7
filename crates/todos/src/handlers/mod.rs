pub mod error;
pub mod extract;
pub mod todos;

pub use error::AppError;
pub use extract::{AppJson, AppPath};
