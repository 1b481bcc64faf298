//! Text and JSON rendering of command results.

use anyhow::Result;
use notifia_core::article::{Article, ArticleDetail, Category};
use serde::Serialize;

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn articles(articles: &[Article], as_json: bool) -> Result<()> {
    if as_json {
        return json(articles);
    }
    if articles.is_empty() {
        println!("No articles.");
        return Ok(());
    }
    for article in articles {
        println!("{}", article_line(article));
    }
    Ok(())
}

pub fn article_line(article: &Article) -> String {
    let mut flags = String::new();
    if article.is_bookmarked {
        flags.push_str(" [saved]");
    }
    if article.is_liked {
        flags.push_str(" [liked]");
    }
    let category = if article.category.is_empty() {
        String::new()
    } else {
        format!(" ({})", article.category)
    };
    format!(
        "[{}] {}{}  {} views, {} likes{}",
        article.id,
        article.title,
        category,
        article.views_label(),
        article.likes,
        flags
    )
}

pub fn detail(detail: &ArticleDetail, as_json: bool) -> Result<()> {
    if as_json {
        return json(detail);
    }
    println!("{}", article_line(&detail.article));
    if let Some(date) = detail.published_date() {
        println!("Published {}", date.format("%Y-%m-%d"));
    }
    if !detail.tags.is_empty() {
        println!("Tags: {}", detail.tags.join(", "));
    }
    println!();
    if !detail.article.summary.is_empty() {
        println!("{}\n", detail.article.summary);
    }
    println!("{}", detail.content);
    if let Some(source) = &detail.source_url {
        println!("\nSource: {}", source);
    }
    Ok(())
}

pub fn categories(categories: &[Category], as_json: bool) -> Result<()> {
    if as_json {
        return json(categories);
    }
    for category in categories {
        println!("{:>4}  {}", category.id, category.name);
    }
    Ok(())
}
