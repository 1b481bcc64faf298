use anyhow::Result;

use crate::context::AppContext;

pub fn show(ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.theme.mode());
    Ok(())
}

pub async fn toggle(ctx: &AppContext) -> Result<()> {
    let mode = ctx.theme.toggle().await;
    println!("Theme is now {}", mode);
    Ok(())
}
