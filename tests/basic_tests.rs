use object_replicator::{
    AppServices, BucketStatus, ObjectKey, ObjectPayload, ReplicationOutcome, ReplicationRequest,
    ReplicationService, StoreRole, create_in_memory_app,
};

async fn put(services: &AppServices, role: StoreRole, key: &str, data: &'static str) {
    let handle = services.store(role);
    handle.store.ensure_bucket(&handle.bucket).await.unwrap();
    handle
        .store
        .put_object(&handle.bucket, &ObjectKey::new(key).unwrap(), ObjectPayload::from(data))
        .await
        .unwrap();
}

async fn target_bytes(services: &AppServices, key: &str) -> Vec<u8> {
    services
        .target
        .store
        .get_object(&services.target.bucket, &ObjectKey::new(key).unwrap())
        .await
        .unwrap()
        .into_bytes()
        .to_vec()
}

#[tokio::test]
async fn test_two_key_bulk_run() {
    let services = create_in_memory_app().await.unwrap();
    put(&services, StoreRole::Source, "a.txt", "alpha").await;
    put(&services, StoreRole::Source, "b.txt", "bravo").await;
    put(&services, StoreRole::Target, "a.txt", "alpha").await;

    let report = services.replication_service.replicate_all().await.unwrap();

    assert_eq!(report.source_total, 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.replicated(), 1);
    assert_eq!(report.bytes_transferred(), 5);
    assert_eq!(target_bytes(&services, "b.txt").await, b"bravo");
}

#[tokio::test]
async fn test_existing_key_with_different_content_is_not_overwritten() {
    let services = create_in_memory_app().await.unwrap();
    put(&services, StoreRole::Source, "config.json", "{\"v\":2}").await;
    put(&services, StoreRole::Target, "config.json", "{\"v\":1}").await;

    let single = services
        .replication_service
        .replicate(ReplicationRequest::new(ObjectKey::new("config.json").unwrap()))
        .await
        .unwrap();
    assert!(matches!(single, ReplicationOutcome::AlreadyExists { .. }));

    let report = services.replication_service.replicate_all().await.unwrap();
    assert_eq!(report.skipped(), 1);

    assert_eq!(target_bytes(&services, "config.json").await, b"{\"v\":1}");
}

#[tokio::test]
async fn test_binary_payload_round_trip() {
    let services = create_in_memory_app().await.unwrap();
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let key = ObjectKey::new("blobs/raw.bin").unwrap();

    services
        .source
        .store
        .put_object(&services.source.bucket, &key, ObjectPayload::from(data.clone()))
        .await
        .unwrap();

    let outcome = services
        .replication_service
        .replicate(ReplicationRequest::new(key.clone()))
        .await
        .unwrap();

    assert_eq!(outcome, ReplicationOutcome::Replicated { key, size: 4096 });
    assert_eq!(target_bytes(&services, "blobs/raw.bin").await, data);
}

#[tokio::test]
async fn test_source_is_never_modified() {
    let services = create_in_memory_app().await.unwrap();
    put(&services, StoreRole::Source, "a.txt", "alpha").await;

    services.replication_service.replicate_all().await.unwrap();

    let source_keys = services
        .source
        .store
        .list_keys(&services.source.bucket)
        .await
        .unwrap();
    assert_eq!(source_keys.len(), 1);
    assert_eq!(source_keys[0].key.as_str(), "a.txt");
    assert_eq!(source_keys[0].size, 5);
}

#[tokio::test]
async fn test_ensure_target_bucket_reports_status() {
    let services = create_in_memory_app().await.unwrap();

    assert_eq!(
        services.replication_service.ensure_target_bucket().await.unwrap(),
        BucketStatus::Created
    );
    assert_eq!(
        services.replication_service.ensure_target_bucket().await.unwrap(),
        BucketStatus::Existing
    );
}
