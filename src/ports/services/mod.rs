mod replication_service;

pub use replication_service::ReplicationService;
