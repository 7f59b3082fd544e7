//! S3 attachment backend using `aws-sdk-s3`.

mod error;
mod store;

pub use store::S3AttachmentStore;
