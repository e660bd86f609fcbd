pub mod replication_handlers;

pub use replication_handlers::*;
