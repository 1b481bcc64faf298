//! Reading history domain module.

mod model;

pub use model::{HistoryItem, MAX_HISTORY_ITEMS, ViewedArticle, next_viewed_at, record};
