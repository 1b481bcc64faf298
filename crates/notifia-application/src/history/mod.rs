mod cache;

pub use cache::HistoryCache;
