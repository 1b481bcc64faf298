use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use notifia_core::article::ArticleQuery;

mod commands;
mod context;
mod logging;

use context::{AppContext, Overrides, Settings};

#[derive(Parser)]
#[command(name = "notifia")]
#[command(about = "NotifIA CLI - read the news feed from the terminal", long_about = None)]
struct Cli {
    /// Path to config.toml (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:3000/api
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory for the session, history and theme records
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Keep every record in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging for the notifia crates
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Client configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands that need the session, storage and API wired up.
#[derive(Subcommand)]
enum ClientCommand {
    /// Sign in with email and password
    Login { email: String, password: String },
    /// Create an account and sign in
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Sign out and forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List the latest articles
    Articles {
        /// Only articles matching this text
        #[arg(long)]
        search: Option<String>,
        /// Category id (see `categories`)
        #[arg(long)]
        category: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size (default: feed.page_size)
        #[arg(long)]
        limit: Option<u32>,
        /// Keep refreshing until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// List the article categories
    Categories,
    /// Read one article and add it to the reading history
    Article {
        id: String,
        /// Keep refreshing until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// List bookmarked articles
    Bookmarks,
    /// Bookmark or un-bookmark an article
    Favorite { id: String },
    /// Like or unlike an article
    Like { id: String },
    /// Reading history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List viewed articles, newest first
    List,
    /// Delete the reading history
    Clear,
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(&Overrides {
        config: cli.config.clone(),
        base_url: cli.base_url.clone(),
        storage_dir: cli.storage_dir.clone(),
    })?;
    let _log_guard = logging::init(&settings.config.logging, cli.verbose)?;
    if let Some(e) = &settings.load_error {
        tracing::warn!(
            "[Config] Ignoring {}: {}. Using defaults.",
            settings.service.path().display(),
            e
        );
    }

    match cli.command {
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(&settings, cli.json),
            ConfigAction::Init { force } => commands::config::init(&settings, force),
        },
        Commands::Client(command) => {
            let ctx = AppContext::build(settings.config, cli.ephemeral).await?;
            run(command, &ctx, cli.json).await
        }
    }
}

async fn run(command: ClientCommand, ctx: &AppContext, json: bool) -> Result<()> {
    match command {
        ClientCommand::Login { email, password } => {
            commands::auth::login(ctx, &email, &password).await
        }
        ClientCommand::Register {
            name,
            email,
            password,
        } => commands::auth::register(ctx, &name, &email, &password).await,
        ClientCommand::Logout => commands::auth::logout(ctx).await,
        ClientCommand::Whoami => commands::auth::whoami(ctx, json),
        ClientCommand::Articles {
            search,
            category,
            page,
            limit,
            watch,
        } => {
            let mut query = ArticleQuery {
                page,
                limit: limit.unwrap_or(ctx.config.feed.page_size),
                ..ArticleQuery::default()
            };
            if let Some(search) = search {
                query = query.with_search(search);
            }
            if let Some(category) = category {
                query = query.with_category(category);
            }
            commands::feed::articles(ctx, query, watch, json).await
        }
        ClientCommand::Categories => commands::feed::categories(ctx, json).await,
        ClientCommand::Article { id, watch } => commands::feed::article(ctx, &id, watch, json).await,
        ClientCommand::Bookmarks => commands::feed::bookmarks(ctx, json).await,
        ClientCommand::Favorite { id } => commands::feed::favorite(ctx, &id).await,
        ClientCommand::Like { id } => commands::feed::like(ctx, &id).await,
        ClientCommand::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => commands::history::list(ctx, json).await,
            HistoryAction::Clear => commands::history::clear(ctx).await,
        },
        ClientCommand::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => commands::theme::show(ctx),
            ThemeAction::Toggle => commands::theme::toggle(ctx).await,
        },
    }
}
