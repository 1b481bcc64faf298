use std::time::Duration;

use anyhow::Result;
use notifia_core::article::ArticleQuery;
use notifia_core::session::Route;
use tokio::time::{Interval, MissedTickBehavior};

use super::output;
use crate::context::AppContext;

pub async fn articles(
    ctx: &AppContext,
    query: ArticleQuery,
    watch: bool,
    as_json: bool,
) -> Result<()> {
    let mut shown = ctx.articles.list_articles(&query).await?;
    output::articles(&shown, as_json)?;
    if !watch {
        return Ok(());
    }

    let period = Duration::from_secs(ctx.config.feed.poll_interval_secs);
    let mut refresh = Watch::start(period).await;
    while refresh.next().await {
        match ctx.articles.list_articles(&query).await {
            Ok(articles) if articles != shown => {
                println!();
                output::articles(&articles, as_json)?;
                shown = articles;
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("[Cli] Feed refresh failed: {}", e),
        }
    }
    Ok(())
}

pub async fn categories(ctx: &AppContext, as_json: bool) -> Result<()> {
    let categories = ctx.articles.list_categories().await?;
    output::categories(&categories, as_json)
}

/// Shows one article and records it in the reading history.
pub async fn article(ctx: &AppContext, id: &str, watch: bool, as_json: bool) -> Result<()> {
    let mut shown = ctx.articles.open_article(id, &ctx.history).await?;
    output::detail(&shown, as_json)?;
    if !watch {
        return Ok(());
    }

    let period = Duration::from_secs(ctx.config.feed.detail_poll_interval_secs);
    let mut refresh = Watch::start(period).await;
    while refresh.next().await {
        match ctx.articles.get_article(id).await {
            Ok(detail) if detail != shown => {
                println!();
                output::detail(&detail, as_json)?;
                shown = detail;
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("[Cli] Article refresh failed: {}", e),
        }
    }
    Ok(())
}

pub async fn bookmarks(ctx: &AppContext, as_json: bool) -> Result<()> {
    ctx.require(Route::Bookmarks)?;
    let articles = ctx.articles.list_bookmarks().await?;
    output::articles(&articles, as_json)
}

pub async fn favorite(ctx: &AppContext, id: &str) -> Result<()> {
    // Bookmarking needs the same access as the bookmarks screen.
    ctx.require(Route::Bookmarks)?;
    ctx.articles.toggle_favorite(id).await?;
    println!("Toggled bookmark on article {}", id);
    Ok(())
}

pub async fn like(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.require(Route::Bookmarks)?;
    let status = ctx.articles.toggle_like(id).await?;
    match (status.is_liked, status.likes_count) {
        (true, Some(count)) => println!("Liked article {} ({} likes)", id, count),
        (true, None) => println!("Liked article {}", id),
        (false, _) => println!("Removed like from article {}", id),
    }
    Ok(())
}

/// Periodic refresh until Ctrl-C.
struct Watch {
    ticker: Interval,
}

impl Watch {
    async fn start(period: Duration) -> Self {
        let mut ticker = tokio::time::interval(period.max(Duration::from_secs(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; the data is already on screen.
        ticker.tick().await;
        Self { ticker }
    }

    /// Waits for the next refresh. Returns `false` once Ctrl-C is pressed.
    async fn next(&mut self) -> bool {
        tokio::select! {
            _ = self.ticker.tick() => true,
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("[Cli] Stopped watching");
                false
            }
        }
    }
}
