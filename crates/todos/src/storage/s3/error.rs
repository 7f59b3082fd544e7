//! S3 error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `todos_core::storage`.

use std::fmt::Debug;

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::presigning::PresigningConfigError;
use todos_core::storage::RepositoryError;

/// Map a HeadObject SDK error to RepositoryError.
///
/// A missing object is the normal "no attachment" signal. S3 reports it as
/// 404 when the caller may list the bucket and as 403 when it may not, so
/// both statuses mean `NotFound` here.
pub fn map_head_object_error(
    err: SdkError<HeadObjectError, HttpResponse>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let status = err.raw_response().map(|r| r.status().as_u16());
    if matches!(status, Some(403 | 404)) {
        return RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        };
    }

    match err.into_service_error() {
        HeadObjectError::NotFound(_) => RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        },
        err => RepositoryError::QueryFailed(format!("HeadObject failed: {:?}", err)),
    }
}

/// Map a PutObject presigning error to RepositoryError.
pub fn map_presign_put_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutObjectError, R>,
) -> RepositoryError {
    RepositoryError::QueryFailed(format!(
        "PutObject presigning failed: {:?}",
        err.into_service_error()
    ))
}

/// Map a GetObject presigning error to RepositoryError.
pub fn map_presign_get_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetObjectError, R>,
) -> RepositoryError {
    RepositoryError::QueryFailed(format!(
        "GetObject presigning failed: {:?}",
        err.into_service_error()
    ))
}

/// Map an invalid presigning expiration to RepositoryError.
pub fn map_presigning_config_error(err: PresigningConfigError) -> RepositoryError {
    RepositoryError::InvalidData(format!("Invalid signed URL expiration: {}", err))
}
