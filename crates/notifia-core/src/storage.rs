//! Persistent key-value store port.

use async_trait::async_trait;

use crate::error::Result;

/// Fixed keys of the records this client persists.
///
/// Each key is owned by exactly one service; nothing else writes it.
pub mod keys {
    /// Serialized [`User`](crate::user::User) of the current session.
    pub const USER: &str = "user";
    /// Serialized history log.
    pub const HISTORY: &str = "article_history";
    /// Theme preference as a JSON bool.
    pub const DARK_THEME: &str = "isDarkTheme";
    /// `Cookie` header of the API session, carried between CLI runs.
    pub const SESSION_COOKIES: &str = "session_cookies";
}

/// Asynchronous string key-value storage.
///
/// Each call is independent and atomic from the caller's perspective.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
