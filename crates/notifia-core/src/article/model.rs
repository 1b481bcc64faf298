//! Article domain models.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::history::ViewedArticle;

/// Image shown when the API has none for an article.
pub const DEFAULT_IMAGE_URL: &str = "https://placehold.co/600x400/png";

/// A feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub image_url: String,
    pub views: u64,
    pub likes: u64,
    pub is_bookmarked: bool,
    pub is_liked: bool,
}

impl Article {
    /// Compact view counter, e.g. `12.5K`.
    pub fn views_label(&self) -> String {
        format_views(self.views)
    }

    pub fn as_viewed(&self) -> ViewedArticle {
        ViewedArticle {
            id: self.id.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            category: self.category.clone(),
        }
    }
}

/// Full article as shown on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub content: String,
    pub source_url: Option<String>,
    pub published_at: Option<String>,
    pub tags: Vec<String>,
}

impl ArticleDetail {
    /// Calendar date of publication, when the API sent a parseable timestamp.
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.published_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d"))
            .ok()
    }

    /// The entry recorded in the reading history when this article is opened.
    pub fn as_viewed(&self) -> ViewedArticle {
        self.article.as_viewed()
    }
}

/// A feed category. Id `0` is the synthetic "all" category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub const ALL_ID: i64 = 0;

    pub fn all() -> Self {
        Self {
            id: Self::ALL_ID,
            name: "Todo".to_string(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.id == Self::ALL_ID
    }
}

/// Result of `POST /articles/{id}/like`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LikeStatus {
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub likes_count: Option<u64>,
}

/// Parameters of the article feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub category_id: i64,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
            category_id: Category::ALL_ID,
        }
    }
}

impl ArticleQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = category_id;
        self
    }

    /// Query string pairs. The feed is always sorted newest first.
    ///
    /// Blank searches and the "all" category are left out.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if self.category_id != Category::ALL_ID {
            pairs.push(("category".to_string(), self.category_id.to_string()));
        }
        pairs.push(("sort".to_string(), "published_at".to_string()));
        pairs.push(("order".to_string(), "desc".to_string()));
        pairs
    }
}

/// Formats a view counter: `999`, `1.5K`, `2.3M`.
pub fn format_views(views: u64) -> String {
    match views {
        0 => "0".to_string(),
        v if v >= 1_000_000 => format!("{:.1}M", v as f64 / 1_000_000.0),
        v if v >= 1_000 => format!("{:.1}K", v as f64 / 1_000.0),
        v => v.to_string(),
    }
}
