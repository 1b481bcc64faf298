//! Application layer for the NotifIA client.
//!
//! This crate provides the services that coordinate the domain models in
//! `notifia-core` with the storage and HTTP ports implemented by the
//! infrastructure layer.

pub mod article;
pub mod history;
pub mod session;
pub mod theme;

#[cfg(test)]
mod test_support;

pub use article::ArticleService;
pub use history::HistoryCache;
pub use session::SessionManager;
pub use theme::ThemeService;
