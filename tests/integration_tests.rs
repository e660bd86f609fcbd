use async_trait::async_trait;
use axum_test::TestServer;
use object_replicator::{
    ApacheObjectStoreAdapter, BucketName, ObjectInfo, ObjectKey, ObjectPayload, ObjectStore,
    ReplicationServiceImpl, StorageError,
    adapters::inbound::http::router::{AppState, create_router},
    create_in_memory_app,
    domain::StorageResult,
};
use serde_json::json;
use std::sync::Arc;

/// Store whose every call fails as an unreachable endpoint would
struct UnreachableStore;

impl UnreachableStore {
    fn error() -> StorageError {
        StorageError::infrastructure("dispatch failure", "connection refused")
    }
}

#[async_trait]
impl ObjectStore for UnreachableStore {
    async fn bucket_exists(&self, _bucket: &BucketName) -> StorageResult<bool> {
        Err(Self::error())
    }

    async fn create_bucket(&self, _bucket: &BucketName) -> StorageResult<()> {
        Err(Self::error())
    }

    async fn delete_bucket(&self, _bucket: &BucketName) -> StorageResult<()> {
        Err(Self::error())
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketName>> {
        Err(Self::error())
    }

    async fn list_keys(&self, _bucket: &BucketName) -> StorageResult<Vec<ObjectInfo>> {
        Err(Self::error())
    }

    async fn get_object(
        &self,
        _bucket: &BucketName,
        _key: &ObjectKey,
    ) -> StorageResult<ObjectPayload> {
        Err(Self::error())
    }

    async fn head_object(&self, _bucket: &BucketName, _key: &ObjectKey) -> StorageResult<bool> {
        Err(Self::error())
    }

    async fn put_object(
        &self,
        _bucket: &BucketName,
        _key: &ObjectKey,
        _payload: ObjectPayload,
    ) -> StorageResult<()> {
        Err(Self::error())
    }

    async fn delete_object(&self, _bucket: &BucketName, _key: &ObjectKey) -> StorageResult<()> {
        Err(Self::error())
    }
}

/// In-memory target that fails object probes or uploads on demand
#[derive(Default)]
struct FaultyTarget {
    inner: ApacheObjectStoreAdapter,
    fail_head: bool,
    fail_put: bool,
}

#[async_trait]
impl ObjectStore for FaultyTarget {
    async fn bucket_exists(&self, bucket: &BucketName) -> StorageResult<bool> {
        self.inner.bucket_exists(bucket).await
    }

    async fn create_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        self.inner.create_bucket(bucket).await
    }

    async fn delete_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        self.inner.delete_bucket(bucket).await
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketName>> {
        self.inner.list_buckets().await
    }

    async fn list_keys(&self, bucket: &BucketName) -> StorageResult<Vec<ObjectInfo>> {
        self.inner.list_keys(bucket).await
    }

    async fn get_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
    ) -> StorageResult<ObjectPayload> {
        self.inner.get_object(bucket, key).await
    }

    async fn head_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<bool> {
        if self.fail_head {
            return Err(StorageError::infrastructure("head", "403 Forbidden"));
        }
        self.inner.head_object(bucket, key).await
    }

    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        payload: ObjectPayload,
    ) -> StorageResult<()> {
        if self.fail_put {
            return Err(StorageError::infrastructure("put", "quota exceeded"));
        }
        self.inner.put_object(bucket, key, payload).await
    }

    async fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<()> {
        self.inner.delete_object(bucket, key).await
    }
}

/// Server whose source holds `a.txt` and whose target is `target`
async fn server_with_target(target: Arc<dyn ObjectStore>) -> TestServer {
    let source_bucket = BucketName::new("source-bucket").unwrap();
    let source: Arc<dyn ObjectStore> = Arc::new(ApacheObjectStoreAdapter::in_memory());
    source.create_bucket(&source_bucket).await.unwrap();
    seed(&source, &source_bucket, "a.txt", "a").await;

    let service = ReplicationServiceImpl::new(
        source,
        source_bucket,
        target,
        BucketName::new("replicated-bucket").unwrap(),
    );
    TestServer::new(create_router(AppState::new(Arc::new(service)))).unwrap()
}

async fn setup_test_server() -> (TestServer, object_replicator::AppServices) {
    let services = create_in_memory_app().await.unwrap();

    let state = AppState::new(Arc::new(services.replication_service.clone()));
    let app = create_router(state);
    (TestServer::new(app).unwrap(), services)
}

async fn seed(store: &Arc<dyn ObjectStore>, bucket: &BucketName, key: &str, data: &'static str) {
    store
        .put_object(bucket, &ObjectKey::new(key).unwrap(), ObjectPayload::from(data))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_health() {
    let (server, _) = setup_test_server().await;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_replicate_then_idempotent() {
    let (server, services) = setup_test_server().await;
    seed(&services.source.store, &services.source.bucket, "photos/cat.jpg", "meow").await;

    let first = server
        .post("/v1/replicate")
        .json(&json!({ "s3_key": "photos/cat.jpg" }))
        .await;
    assert_eq!(first.status_code(), 200);
    let body: serde_json::Value = first.json();
    assert_eq!(body["message"], "Replicated 'photos/cat.jpg' successfully");

    let copied = services
        .target
        .store
        .get_object(
            &services.target.bucket,
            &ObjectKey::new("photos/cat.jpg").unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(copied.data().as_ref(), b"meow");

    let second = server
        .post("/v1/replicate")
        .json(&json!({ "s3_key": "photos/cat.jpg" }))
        .await;
    assert_eq!(second.status_code(), 200);
    let body: serde_json::Value = second.json();
    assert_eq!(
        body["message"],
        "Object 'photos/cat.jpg' already exists in target (idempotent)."
    );
}

#[tokio::test]
async fn test_missing_source_object_is_404() {
    let (server, services) = setup_test_server().await;

    let response = server
        .post("/v1/replicate")
        .json(&json!({ "s3_key": "missing.txt" }))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "NotFoundInSource");
    assert!(body["detail"].as_str().unwrap().contains("missing.txt"));

    // Nothing was written, not even the bucket
    assert!(
        !services
            .target
            .store
            .bucket_exists(&services.target.bucket)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_empty_key_is_400() {
    let (server, _) = setup_test_server().await;

    let response = server
        .post("/v1/replicate")
        .json(&json!({ "s3_key": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid object key"));
}

#[tokio::test]
async fn test_unreachable_target_bucket_is_500() {
    let server = server_with_target(Arc::new(UnreachableStore)).await;

    let response = server
        .post("/v1/replicate")
        .json(&json!({ "s3_key": "a.txt" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "StorageError");
}

#[tokio::test]
async fn test_target_probe_failure_is_500() {
    let target = FaultyTarget {
        fail_head: true,
        ..Default::default()
    };
    let server = server_with_target(Arc::new(target)).await;

    let response = server
        .post("/v1/replicate")
        .json(&json!({ "s3_key": "a.txt" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "TargetProbeFailed");
    assert_eq!(body["detail"], "Error checking target");
}

#[tokio::test]
async fn test_upload_failure_is_500() {
    let target = FaultyTarget {
        fail_put: true,
        ..Default::default()
    };
    let server = server_with_target(Arc::new(target)).await;

    let response = server
        .post("/v1/replicate")
        .json(&json!({ "s3_key": "a.txt" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "UploadFailed");
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Upload failed: "));
    assert!(detail.contains("quota exceeded"));
}

#[tokio::test]
async fn test_unreachable_source_is_500() {
    let service = ReplicationServiceImpl::new(
        Arc::new(UnreachableStore),
        BucketName::new("source-bucket").unwrap(),
        Arc::new(ApacheObjectStoreAdapter::in_memory()),
        BucketName::new("replicated-bucket").unwrap(),
    );
    let server = TestServer::new(create_router(AppState::new(Arc::new(service)))).unwrap();

    let response = server
        .post("/v1/replicate")
        .json(&json!({ "s3_key": "a.txt" }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "SourceUnavailable");
}
