//! Infrastructure layer: configuration files, HTTP plumbing and the gateway
//! data store implementations.

pub mod http;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod settings;
