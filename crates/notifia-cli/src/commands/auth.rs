use anyhow::{Result, anyhow};
use notifia_core::NotifiaError;
use notifia_core::session::Route;
use notifia_core::user::User;

use super::output;
use crate::context::AppContext;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let result = ctx.session.sign_in(email, password).await;
    finish_sign_in(ctx, result).await
}

pub async fn register(ctx: &AppContext, name: &str, email: &str, password: &str) -> Result<()> {
    let result = ctx.session.sign_up(name, email, password).await;
    finish_sign_in(ctx, result).await
}

async fn finish_sign_in(ctx: &AppContext, result: Result<User, NotifiaError>) -> Result<()> {
    ctx.save_cookies().await;
    match result {
        Ok(user) => {
            tracing::debug!("[Cli] Next screen: {}", Route::after_sign_in());
            println!("Signed in as {} <{}>", user.name, user.email);
            Ok(())
        }
        // The server accepted the credentials but the record was not
        // persisted: authenticated for this run only. Rejections leave any
        // earlier session in place and are reported as they are.
        Err(e) if !e.is_authentication() && ctx.session.is_authenticated() => {
            Err(anyhow!(e).context("Signed in, but the session could not be saved for the next run"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session.sign_out().await;
    ctx.save_cookies().await;
    tracing::debug!("[Cli] Next screen: {}", Route::after_sign_out());
    println!("Signed out");
    Ok(())
}

pub fn whoami(ctx: &AppContext, as_json: bool) -> Result<()> {
    let snapshot = ctx.session.snapshot();
    if as_json {
        return output::json(&snapshot);
    }
    match &snapshot.user {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
        None => println!("Not signed in"),
    }
    Ok(())
}
