//! Repository traits (ports)

pub mod kv_store;

pub use kv_store::KeyValueStore;
