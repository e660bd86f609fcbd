pub mod object;
pub mod replication;
pub mod store_config;

pub use object::*;
pub use replication::*;
pub use store_config::*;
