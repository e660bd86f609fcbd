mod replication_service_impl;

pub use replication_service_impl::ReplicationServiceImpl;
