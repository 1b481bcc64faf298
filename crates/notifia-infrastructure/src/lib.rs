//! Storage, HTTP and configuration adapters for the NotifIA client.

pub mod config_service;
pub mod http;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http::ReqwestTransport;
pub use crate::paths::NotifiaPaths;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
