//! REST API records for articles and categories.

use serde::Deserialize;

use super::model::{Article, ArticleDetail, Category, DEFAULT_IMAGE_URL};

/// Ids arrive as numbers from the API but are strings everywhere else.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

/// Tags are sent either as an array or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireTags {
    List(Vec<String>),
    Joined(String),
}

impl From<WireTags> for Vec<String> {
    fn from(tags: WireTags) -> Self {
        let raw = match tags {
            WireTags::List(list) => list,
            WireTags::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// An article as returned by `/articles`, `/articles/{id}` and `/articles/bookmarks`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRecord {
    id: WireId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    category_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    views_count: Option<u64>,
    #[serde(default)]
    likes_count: Option<u64>,
    #[serde(default)]
    is_favorite: Option<bool>,
    #[serde(default)]
    is_liked: Option<bool>,
    #[serde(default)]
    tags: Option<WireTags>,
}

impl ArticleRecord {
    pub fn into_article(self) -> Article {
        self.split().0
    }

    pub fn into_detail(self) -> ArticleDetail {
        let (article, rest) = self.split();
        ArticleDetail {
            article,
            content: rest.content.unwrap_or_default(),
            source_url: rest.source_url,
            published_at: rest.published_at,
            tags: rest.tags.map(Vec::from).unwrap_or_default(),
        }
    }

    fn split(self) -> (Article, DetailFields) {
        let article = Article {
            id: self.id.into(),
            title: self.title,
            summary: self.summary,
            category: self.category_name.unwrap_or_default(),
            image_url: self
                .image_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            views: self.views_count.unwrap_or(0),
            likes: self.likes_count.unwrap_or(0),
            is_bookmarked: self.is_favorite.unwrap_or(false),
            is_liked: self.is_liked.unwrap_or(false),
        };
        let rest = DetailFields {
            content: self.content,
            source_url: self.source_url,
            published_at: self.published_at,
            tags: self.tags,
        };
        (article, rest)
    }
}

struct DetailFields {
    content: Option<String>,
    source_url: Option<String>,
    published_at: Option<String>,
    tags: Option<WireTags>,
}

/// `data` of the article list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleList {
    #[serde(default)]
    pub articles: Vec<ArticleRecord>,
}

/// `data` of `GET /articles/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleEnvelope {
    #[serde(default)]
    pub article: Option<ArticleRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category {
            id: record.id,
            name: record.name,
        }
    }
}

/// `data` of `GET /categories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
}
