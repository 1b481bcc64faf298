//! Persisted reading history.

use std::sync::Arc;

use chrono::Utc;
use notifia_core::history::{self, HistoryItem, ViewedArticle};
use notifia_core::storage::{KeyValueStore, keys};
use tokio::sync::Mutex;

/// Most-recent-first log of viewed articles, persisted as one JSON array.
///
/// Errors never reach the caller: a failed read is an empty history and a
/// failed write is logged and dropped. Writers are serialized so two
/// concurrent `add`s cannot lose each other's entry.
pub struct HistoryCache {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl HistoryCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Records a view of `article`, stamped with the current time.
    pub async fn add(&self, article: ViewedArticle) {
        self.add_at(article, Utc::now().timestamp_millis()).await;
    }

    async fn add_at(&self, article: ViewedArticle, now_millis: i64) {
        let _guard = self.write_lock.lock().await;

        let id = article.id.clone();
        let log = history::record(self.load().await, article, now_millis);

        let json = match serde_json::to_string(&log) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("[History] Failed to encode history: {}", e);
                return;
            }
        };

        match self.store.set(keys::HISTORY, &json).await {
            Ok(()) => tracing::debug!("[History] Recorded view of {} ({} entries)", id, log.len()),
            Err(e) => tracing::error!("[History] Error adding to history: {}", e),
        }
    }

    /// Returns the log, newest first. Empty if absent or unreadable.
    pub async fn get(&self) -> Vec<HistoryItem> {
        self.load().await
    }

    /// Deletes the whole log.
    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;

        match self.store.remove(keys::HISTORY).await {
            Ok(()) => tracing::info!("[History] Cleared"),
            Err(e) => tracing::error!("[History] Error clearing history: {}", e),
        }
    }

    async fn load(&self) -> Vec<HistoryItem> {
        match self.store.get(keys::HISTORY).await {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("[History] Ignoring corrupt history: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("[History] Error getting history: {}", e);
                Vec::new()
            }
        }
    }
}
