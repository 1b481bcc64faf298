use anyhow::Result;
use chrono::{DateTime, Local};

use super::output;
use crate::context::AppContext;

pub async fn list(ctx: &AppContext, as_json: bool) -> Result<()> {
    let items = ctx.history.get().await;
    if as_json {
        return output::json(&items);
    }
    if items.is_empty() {
        println!("No reading history.");
        return Ok(());
    }
    for item in &items {
        let viewed = DateTime::from_timestamp_millis(item.viewed_at)
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{}  [{}] {} ({})", viewed, item.id, item.title, item.category);
    }
    Ok(())
}

pub async fn clear(ctx: &AppContext) -> Result<()> {
    ctx.history.clear().await;
    println!("Reading history cleared");
    Ok(())
}
