//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `TodoRepository` and
//! `AttachmentStore` traits defined in `todos_core::storage`:
//!
//! - `dynamodb`: item store on AWS DynamoDB (`aws-sdk-dynamodb`)
//! - `s3`: attachment store on AWS S3 (`aws-sdk-s3`)
//! - `inmemory`: both stores in memory, for tests and `--in-memory` runs

pub mod dynamodb;
pub mod inmemory;
pub mod s3;

pub use dynamodb::DynamoDbRepository;
pub use inmemory::{InMemoryAttachmentStore, InMemoryRepository};
pub use s3::S3AttachmentStore;

use crate::config::Config;

/// Build the DynamoDB and S3 backends from configuration.
///
/// Uses the AWS SDK default credential chain. When `endpoint_url` is set
/// (local emulators) S3 is addressed path-style.
pub async fn aws_backends(config: &Config) -> (DynamoDbRepository, S3AttachmentStore) {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;

    let dynamodb = aws_sdk_dynamodb::Client::new(&sdk_config);
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();
    let s3 = aws_sdk_s3::Client::from_conf(s3_config);

    (
        DynamoDbRepository::new(dynamodb, &config.table_name, &config.index_name),
        S3AttachmentStore::new(s3, &config.bucket_name, config.signed_url_expiration),
    )
}
