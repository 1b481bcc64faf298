pub mod auth;
pub mod config;
pub mod feed;
pub mod history;
pub mod output;
pub mod theme;
