//! Article feed, detail and engagement endpoints.

use std::sync::Arc;

use notifia_core::api::{ApiRequest, Envelope, HttpTransport};
use notifia_core::article::{
    Article, ArticleDetail, ArticleEnvelope, ArticleList, ArticleQuery, ArticleRecord, Category,
    CategoryList, LikeStatus,
};
use notifia_core::error::{NotifiaError, Result};

use crate::history::HistoryCache;

/// Reads the news feed and toggles per-user article flags.
///
/// Bookmark and like endpoints rely on the session cookie held by the
/// transport; callers should check the route guard before using them.
pub struct ArticleService {
    transport: Arc<dyn HttpTransport>,
}

impl ArticleService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Fetches one page of the feed, newest first.
    pub async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let request = ApiRequest::get("/articles").with_query(query.to_pairs());
        let list: ArticleList = self.fetch(request).await?;
        tracing::debug!(
            "[Articles] Page {} returned {} articles",
            query.page,
            list.articles.len()
        );
        Ok(list
            .articles
            .into_iter()
            .map(ArticleRecord::into_article)
            .collect())
    }

    /// Fetches the categories, preceded by the "all" pseudo-category.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let list: CategoryList = self.fetch(ApiRequest::get("/categories")).await?;
        Ok(std::iter::once(Category::all())
            .chain(list.categories.into_iter().map(Category::from))
            .collect())
    }

    /// Fetches one article with its full content.
    ///
    /// # Errors
    ///
    /// Returns [`NotifiaError::NotFound`] if the server has no such article.
    pub async fn get_article(&self, id: &str) -> Result<ArticleDetail> {
        let path = Self::article_path(id, "")?;
        let envelope: ArticleEnvelope = self.fetch(ApiRequest::get(path)).await?;
        envelope
            .article
            .map(ArticleRecord::into_detail)
            .ok_or_else(|| NotifiaError::not_found("article", id))
    }

    /// Fetches an article and records the view in `history`.
    pub async fn open_article(&self, id: &str, history: &HistoryCache) -> Result<ArticleDetail> {
        let detail = self.get_article(id).await?;
        history.add(detail.as_viewed()).await;
        Ok(detail)
    }

    /// Fetches the signed-in user's bookmarks.
    pub async fn list_bookmarks(&self) -> Result<Vec<Article>> {
        let list: ArticleList = self.fetch(ApiRequest::get("/articles/bookmarks")).await?;
        Ok(list
            .articles
            .into_iter()
            .map(|record| {
                let mut article = record.into_article();
                article.is_bookmarked = true;
                article
            })
            .collect())
    }

    /// Adds or removes the article from the user's bookmarks.
    pub async fn toggle_favorite(&self, id: &str) -> Result<()> {
        let path = Self::article_path(id, "/favorite")?;
        self.transport
            .send(ApiRequest::post(path))
            .await?
            .error_for_status()?;
        tracing::info!("[Articles] Toggled bookmark on {}", id);
        Ok(())
    }

    /// Likes or unlikes the article and returns its new like status.
    pub async fn toggle_like(&self, id: &str) -> Result<LikeStatus> {
        let path = Self::article_path(id, "/like")?;
        let status: LikeStatus = self.fetch(ApiRequest::post(path)).await?;
        tracing::info!("[Articles] Like on {} is now {}", id, status.is_liked);
        Ok(status)
    }

    async fn fetch<T>(&self, request: ApiRequest) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let response = self.transport.send(request).await?;
        Ok(Envelope::<T>::from_response(response)?.data_or_default())
    }

    /// `/articles/{id}{suffix}`. Ids are opaque but must stay one path segment.
    fn article_path(id: &str, suffix: &str) -> Result<String> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(NotifiaError::not_found("article", id));
        }
        Ok(format!("/articles/{}{}", id, suffix))
    }
}
