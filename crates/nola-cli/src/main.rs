//! Nola admin - manage a Nola blog from the terminal.
//!
//! A thin front-end over `nola-core`: every command builds the shared
//! application context, passes through the navigation guard for the admin
//! page it stands in for, and prints the result on stdout.

mod commands;
mod notifier;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nola_core::models::PostStatus;
use nola_core::{ApiError, AppContext, Config, Theme};

use notifier::ConsoleNotifier;

// ============================================================================
// Constants
// ============================================================================

/// Daily-rolled log file name inside the cache directory
const LOG_FILE_NAME: &str = "nola.log";

#[derive(Parser)]
#[command(name = "nola", version)]
#[command(about = "Administer a Nola blog from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in as the blog administrator
    Login {
        /// Username (defaults to the last one used)
        #[arg(short, long)]
        username: Option<String>,

        /// Keep the password in the OS keychain for later logins
        #[arg(long)]
        remember: bool,
    },

    /// End the current session
    Logout {
        /// Also remove the password from the OS keychain
        #[arg(long)]
        forget: bool,
    },

    /// Show the session and local settings
    Status,

    /// Blog overview with entry counts
    Overview,

    /// List posts
    Posts {
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Rows per page (defaults to the saved preference)
        #[arg(short, long)]
        size: Option<u32>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Search title and content
        #[arg(short, long)]
        key: Option<String>,

        /// Only posts with this tag id
        #[arg(long)]
        tag: Option<i64>,

        /// Only posts in this category id
        #[arg(long)]
        category: Option<i64>,
    },

    /// List tags
    Tags {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// List categories
    Categories {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// List menus, or the item tree of one menu
    Menus {
        /// Show the items of this menu
        #[arg(long)]
        items: Option<i64>,
    },

    /// List friend links
    Links {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// List diary entries
    Diaries {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// List uploaded files
    Files {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long)]
        size: Option<u32>,

        /// Search file names
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Show blog information
    Blog,

    /// Resolve an admin page through the navigation guard
    Route {
        /// Page name or path, e.g. post, /post or #/tag
        target: String,
    },

    /// Show or change local preferences
    Prefs {
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,

        /// Rows per page for every listing
        #[arg(long)]
        page_size: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Published,
    Draft,
    Deleted,
}

impl From<StatusArg> for PostStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Published => PostStatus::Published,
            StatusArg::Draft => PostStatus::Draft,
            StatusArg::Deleted => PostStatus::Deleted,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr and, when the cache directory is usable, to a daily
/// file. The returned guard flushes the file writer and must outlive `main`.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=nola_core=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = config
        .cache_dir()
        .ok()
        .map(|dir| dir.join("logs"))
        .filter(|dir| std::fs::create_dir_all(dir).is_ok());

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let _log_guard = init_tracing(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "nola starting");

    let ctx = AppContext::init(config, Arc::new(ConsoleNotifier))?;
    notifier::on_first_expiry(&ctx.bus, || {
        eprintln!("Your session has expired. Run `nola login` to sign in again.");
    });

    match cli.command {
        Command::Login { username, remember } => commands::login(&ctx, username, remember).await,
        Command::Logout { forget } => commands::logout(&ctx, forget),
        Command::Status => commands::status(&ctx),
        Command::Overview => commands::overview(&ctx).await,
        Command::Posts {
            page,
            size,
            status,
            key,
            tag,
            category,
        } => {
            let filter = commands::PostFilter {
                status: status.map(PostStatus::from),
                key,
                tag,
                category,
            };
            commands::posts(&ctx, page, size, filter).await
        }
        Command::Tags { page, size } => commands::tags(&ctx, page, size).await,
        Command::Categories { page, size } => commands::categories(&ctx, page, size).await,
        Command::Menus { items } => commands::menus(&ctx, items).await,
        Command::Links { page, size } => commands::links(&ctx, page, size).await,
        Command::Diaries { page, size } => commands::diaries(&ctx, page, size).await,
        Command::Files { page, size, key } => commands::files(&ctx, page, size, key).await,
        Command::Blog => commands::blog(&ctx).await,
        Command::Route { target } => commands::route(&ctx, &target),
        Command::Prefs { theme, page_size } => {
            commands::prefs(&ctx, theme.map(Theme::from), page_size)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // API failures were already shown by the notifier
            if e.downcast_ref::<ApiError>().is_none() {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_posts_filters() {
        let cli = Cli::parse_from(["nola", "posts", "--status", "draft", "-k", "rust", "--tag", "3"]);
        match cli.command {
            Command::Posts { page, size, status, key, tag, category } => {
                assert_eq!(page, 1);
                assert_eq!(size, None);
                assert!(matches!(status, Some(StatusArg::Draft)));
                assert_eq!(key.as_deref(), Some("rust"));
                assert_eq!(tag, Some(3));
                assert_eq!(category, None);
            }
            _ => panic!("expected posts command"),
        }
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::parse_from(["nola", "login", "-u", "admin", "--remember"]);
        assert!(matches!(
            cli.command,
            Command::Login { username: Some(ref u), remember: true } if u == "admin"
        ));
    }
}
