use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};

use crate::domain::{
    errors::StorageError,
    value_objects::{BucketName, ObjectKey},
};

/// Convert an object_store error raised while addressing `key` in `bucket`
pub(crate) fn from_object_store_error(
    err: object_store::Error,
    operation: &str,
    bucket: &BucketName,
    key: Option<&ObjectKey>,
) -> StorageError {
    match (err, key) {
        (object_store::Error::NotFound { .. }, Some(key)) => StorageError::ObjectNotFound {
            bucket: bucket.clone(),
            key: key.clone(),
        },
        (object_store::Error::NotFound { .. }, None) => StorageError::BucketNotFound {
            bucket: bucket.clone(),
        },
        (err, _) => StorageError::InfrastructureError {
            message: format!("Failed to {} in bucket '{}'", operation, bucket),
            source: Some(err.to_string()),
        },
    }
}

/// Convert an AWS SDK error into an infrastructure error, keeping the
/// service error code when the store returned one.
pub(crate) fn from_sdk_error<E, R>(err: SdkError<E, R>, operation: &str) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = match err.as_service_error() {
        Some(service_err) => format!(
            "{}: {}",
            service_err.code().unwrap_or("Unknown"),
            service_err.message().unwrap_or("no message")
        ),
        None => match &err {
            SdkError::DispatchFailure(_) => "dispatch failure (endpoint unreachable?)".to_string(),
            SdkError::TimeoutError(_) => "request timed out".to_string(),
            other => format!("{:?}", other),
        },
    };

    StorageError::InfrastructureError {
        message: format!("Failed to {}", operation),
        source: Some(detail),
    }
}

/// Which part of an object address a failed read reported as missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MissingResource {
    Bucket,
    Object,
}

/// Classify a failed object read from its S3 error code and HTTP status.
///
/// S3 and MinIO answer both `NoSuchBucket` and `NoSuchKey` with a 404, so
/// the code is checked before falling back to the bare status.
pub(crate) fn missing_resource(
    code: Option<&str>,
    http_not_found: bool,
) -> Option<MissingResource> {
    match code {
        Some("NoSuchBucket") => Some(MissingResource::Bucket),
        Some("NoSuchKey") => Some(MissingResource::Object),
        _ if http_not_found => Some(MissingResource::Object),
        _ => None,
    }
}

/// Whether an SDK error carries an HTTP 404 from the store
pub(crate) fn is_http_not_found<E>(
    err: &SdkError<E, aws_sdk_s3::config::http::HttpResponse>,
) -> bool {
    err.raw_response()
        .is_some_and(|response| response.status().as_u16() == 404)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_with_key_is_object_not_found() {
        let bucket = BucketName::new("source-bucket").unwrap();
        let key = ObjectKey::new("a.txt").unwrap();
        let err = object_store::Error::NotFound {
            path: "a.txt".to_string(),
            source: "missing".into(),
        };

        match from_object_store_error(err, "get object", &bucket, Some(&key)) {
            StorageError::ObjectNotFound { bucket: b, key: k } => {
                assert_eq!(b, bucket);
                assert_eq!(k, key);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_are_infrastructure() {
        let bucket = BucketName::new("source-bucket").unwrap();
        let err = object_store::Error::Generic {
            store: "InMemory",
            source: "boom".into(),
        };

        let mapped = from_object_store_error(err, "list objects", &bucket, None);
        assert!(matches!(mapped, StorageError::InfrastructureError { .. }));
        assert!(mapped.to_string().contains("list objects"));
    }

    #[test]
    fn test_missing_bucket_is_not_a_missing_object() {
        assert_eq!(
            missing_resource(Some("NoSuchBucket"), true),
            Some(MissingResource::Bucket)
        );
        assert_eq!(
            missing_resource(Some("NoSuchKey"), true),
            Some(MissingResource::Object)
        );
        // HEAD-style responses carry no code, only the status
        assert_eq!(missing_resource(None, true), Some(MissingResource::Object));
        assert_eq!(missing_resource(Some("AccessDenied"), false), None);
        assert_eq!(missing_resource(None, false), None);
    }
}
