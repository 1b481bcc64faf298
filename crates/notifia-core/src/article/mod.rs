//! Article feed domain module.
//!
//! # Module Structure
//!
//! - `model`: articles, categories and feed queries as the client sees them
//! - `wire`: the snake_case records the REST API returns, and their mapping

mod model;
mod wire;

pub use model::{
    Article, ArticleDetail, ArticleQuery, Category, DEFAULT_IMAGE_URL, LikeStatus, format_views,
};
pub use wire::{ArticleEnvelope, ArticleList, ArticleRecord, CategoryList, CategoryRecord};
