//! Domain models and ports of the NotifIA news client.
//!
//! Nothing in this crate performs I/O. Storage and HTTP are reached through
//! the [`storage::KeyValueStore`] and [`api::HttpTransport`] traits, which the
//! infrastructure crate implements.

pub mod api;
pub mod article;
pub mod config;
pub mod error;
pub mod history;
pub mod session;
pub mod storage;
pub mod theme;
pub mod user;

// Re-export common error type
pub use error::{NotifiaError, Result};
