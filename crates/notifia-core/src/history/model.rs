//! Bounded, de-duplicated, most-recent-first log of viewed articles.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the history log.
pub const MAX_HISTORY_ITEMS: usize = 50;

/// An article as reported by the caller when it is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedArticle {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub category: String,
}

/// One entry of the persisted history log.
///
/// `viewed_at` is milliseconds since the Unix epoch and is always assigned by
/// the cache, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub category: String,
    pub viewed_at: i64,
}

impl HistoryItem {
    pub fn new(article: ViewedArticle, viewed_at: i64) -> Self {
        Self {
            id: article.id,
            title: article.title,
            image_url: article.image_url,
            category: article.category,
            viewed_at,
        }
    }
}

/// Timestamp for a new front entry.
///
/// Uses `now_millis` unless the clock has not moved past the current front
/// entry, in which case it steps one millisecond ahead of it. Keeps the log
/// strictly decreasing in `viewed_at`.
pub fn next_viewed_at(log: &[HistoryItem], now_millis: i64) -> i64 {
    match log.first() {
        Some(front) if front.viewed_at >= now_millis => front.viewed_at.saturating_add(1),
        _ => now_millis,
    }
}

/// Records a view: drops any entry with the same id, prepends the new one
/// and truncates to [`MAX_HISTORY_ITEMS`].
pub fn record(log: Vec<HistoryItem>, article: ViewedArticle, now_millis: i64) -> Vec<HistoryItem> {
    let viewed_at = next_viewed_at(&log, now_millis);
    let id = article.id.clone();

    let mut next = Vec::with_capacity((log.len() + 1).min(MAX_HISTORY_ITEMS));
    next.push(HistoryItem::new(article, viewed_at));
    next.extend(log.into_iter().filter(|existing| existing.id != id));
    next.truncate(MAX_HISTORY_ITEMS);
    next
}
