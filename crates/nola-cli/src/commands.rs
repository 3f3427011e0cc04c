//! Command implementations.
//!
//! Each admin page the browser front-end had is a command here. Commands
//! go through the same navigation guard, so anything other than `login`,
//! `status`, `blog`, `route` and `prefs` requires a session.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use nola_core::models::{
    DiarySort, FileSort, LinkSort, MenuItem, Pager, PostStatus, PostVisible,
};
use nola_core::utils::{format_size, format_timestamp, truncate_string};
use nola_core::{
    ApiError, AppContext, Config, CredentialStore, NavigationOutcome, PostQuery, Route, Theme,
};

/// Column width for titles and names
const NAME_WIDTH: usize = 36;

/// Column width for previews of longer text
const PREVIEW_WIDTH: usize = 60;

/// Optional post listing filters
#[derive(Debug, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub key: Option<String>,
    pub tag: Option<i64>,
    pub category: Option<i64>,
}

/// Pass the navigation guard for `route`, failing if it sends us elsewhere.
fn enter(ctx: &AppContext, route: Route) -> Result<()> {
    match ctx.router().navigate(route) {
        NavigationOutcome::Arrived { route: arrived, title } if arrived == route => {
            debug!(title = %title, "Entered page");
            Ok(())
        }
        NavigationOutcome::Arrived { route: Route::Login, .. } => {
            bail!("Not logged in. Run `nola login` first.")
        }
        NavigationOutcome::Arrived { route: arrived, .. } => {
            bail!("{} is not available here", arrived.display_name())
        }
        NavigationOutcome::Cancelled => bail!("Navigation cancelled"),
    }
}

fn page_footer<T>(pager: &Pager<T>) {
    println!(
        "\nPage {}/{} - {} total",
        pager.page,
        pager.total_page.max(1),
        pager.total_data
    );
}

fn read_line(label: &str) -> Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn prompt_password() -> Result<String> {
    rpassword::prompt_password("Password: ").context("Failed to read password")
}

/// The server turned the credentials down, as opposed to being unreachable.
fn saved_password_rejected(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Application { .. }))
}

// ============================================================================
// Session
// ============================================================================

pub async fn login(ctx: &AppContext, username: Option<String>, remember: bool) -> Result<()> {
    if let Some(session) = ctx.session.current() {
        println!("Already logged in as {}", session.name());
        return Ok(());
    }

    let username = match username.or_else(|| ctx.config.last_username.clone()) {
        Some(username) => username,
        None => read_line("Username: ")?,
    };
    if username.is_empty() {
        bail!("A username is required");
    }

    let keychain = CredentialStore::default();
    let stored = keychain.password(&username).unwrap_or_else(|e| {
        warn!(error = %e, "Keychain unavailable");
        None
    });

    let (session, password, stale) = match stored {
        Some(saved) => {
            debug!(username = %username, "Using password from keychain");
            match ctx.sign_in(&username, &saved).await {
                Ok(session) => (session, saved, false),
                Err(e) if saved_password_rejected(&e) => {
                    warn!(username = %username, "Saved password was rejected");
                    let password = prompt_password()?;
                    let session = ctx.sign_in(&username, &password).await?;
                    (session, password, true)
                }
                Err(e) => return Err(e),
            }
        }
        None => {
            let password = prompt_password()?;
            (ctx.sign_in(&username, &password).await?, password, false)
        }
    };

    // A saved password that stopped working is replaced with the new one
    if remember || stale {
        keychain.store(&username, &password)?;
    }
    if let Err(e) = Config::remember_username(&username) {
        warn!(error = %e, "Failed to save last username");
    }

    println!("Logged in as {}", session.name());
    Ok(())
}

pub fn logout(ctx: &AppContext, forget: bool) -> Result<()> {
    let username = ctx.session.current().map(|s| s.username);
    if ctx.sign_out() {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }

    if forget {
        if let Some(username) = username.or_else(|| ctx.config.last_username.clone()) {
            if CredentialStore::default().forget(&username)? {
                println!("Removed saved password for {}", username);
            }
        }
    }
    Ok(())
}

pub fn status(ctx: &AppContext) -> Result<()> {
    println!("Server:     {}", ctx.config.api_base_url);
    match ctx.session.current() {
        Some(session) => {
            println!("Logged in:  {} ({})", session.name(), session.username);
            if let Some(email) = &session.email {
                println!("Email:      {}", email);
            }
            println!(
                "Since:      {}",
                format_timestamp(session.logged_in_at.timestamp_millis())
            );
            println!(
                "Keychain:   {}",
                if CredentialStore::default().has_credentials(&session.username) {
                    "password saved"
                } else {
                    "no password saved"
                }
            );
        }
        None => println!("Logged in:  no"),
    }

    let prefs = ctx.preferences.get();
    println!(
        "Theme:      {}",
        match prefs.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    );
    Ok(())
}

// ============================================================================
// Pages
// ============================================================================

pub async fn overview(ctx: &AppContext) -> Result<()> {
    enter(ctx, Route::Main)?;
    let api = &ctx.api;

    // One row each is enough to learn the totals
    let post_query = PostQuery::page(1, 1);
    let (blog, posts, tags, categories, links, diaries, files) = futures::join!(
        api.blog_info(),
        api.posts(&post_query),
        api.tags(1, 1),
        api.categories(1, 1),
        api.links(1, 1, LinkSort::default()),
        api.diaries(1, 1, DiarySort::default()),
        api.files(1, 1, None, None, None),
    );

    let blog = blog?;
    println!("{}", blog.title.as_deref().unwrap_or("(untitled blog)"));
    if let Some(subtitle) = blog.subtitle.as_deref().filter(|s| !s.is_empty()) {
        println!("{}", subtitle);
    }
    println!();
    println!("{:<12} {:>6}", "Posts", posts?.total_data);
    println!("{:<12} {:>6}", "Tags", tags?.total_data);
    println!("{:<12} {:>6}", "Categories", categories?.total_data);
    println!("{:<12} {:>6}", "Links", links?.total_data);
    println!("{:<12} {:>6}", "Diaries", diaries?.total_data);
    println!("{:<12} {:>6}", "Files", files?.total_data);
    Ok(())
}

pub async fn posts(ctx: &AppContext, page: u32, size: Option<u32>, filter: PostFilter) -> Result<()> {
    enter(ctx, Route::Post)?;
    let query = PostQuery {
        status: filter.status,
        key: filter.key,
        tag_id: filter.tag,
        category_id: filter.category,
        ..PostQuery::page(page, size.unwrap_or(ctx.preferences.get().post_page_size))
    };
    let pager = ctx.api.posts(&query).await?;

    println!(
        "{:>6}  {:<w$}  {:<9}  {:<7}  {}",
        "ID",
        "TITLE",
        "STATUS",
        "VISIBLE",
        "CREATED",
        w = NAME_WIDTH
    );
    for post in &pager.data {
        let status = match post.status {
            PostStatus::Published => "published",
            PostStatus::Draft => "draft",
            PostStatus::Deleted => "recycled",
        };
        let visible = match post.visible {
            PostVisible::Visible => "yes",
            PostVisible::Hidden => "no",
        };
        let title = if post.pinned {
            truncate_string(&format!("* {}", post.title), NAME_WIDTH)
        } else {
            truncate_string(&post.title, NAME_WIDTH)
        };
        println!(
            "{:>6}  {:<w$}  {:<9}  {:<7}  {}",
            post.post_id,
            title,
            status,
            visible,
            format_timestamp(post.create_time),
            w = NAME_WIDTH
        );
    }
    page_footer(&pager);
    Ok(())
}

pub async fn tags(ctx: &AppContext, page: u32, size: Option<u32>) -> Result<()> {
    enter(ctx, Route::Tag)?;
    let size = size.unwrap_or(ctx.preferences.get().tag_page_size);
    let pager = ctx.api.tags(page, size).await?;

    println!("{:>6}  {:<w$}  {:<24}  {:>5}", "ID", "NAME", "SLUG", "POSTS", w = NAME_WIDTH);
    for tag in &pager.data {
        println!(
            "{:>6}  {:<w$}  {:<24}  {:>5}",
            tag.tag_id.map(|id| id.to_string()).unwrap_or_default(),
            truncate_string(&tag.display_name, NAME_WIDTH),
            truncate_string(&tag.slug, 24),
            tag.post_count,
            w = NAME_WIDTH
        );
    }
    page_footer(&pager);
    Ok(())
}

pub async fn categories(ctx: &AppContext, page: u32, size: Option<u32>) -> Result<()> {
    enter(ctx, Route::Category)?;
    let size = size.unwrap_or(ctx.preferences.get().category_page_size);
    let pager = ctx.api.categories(page, size).await?;

    println!("{:>6}  {:<w$}  {:<24}  {:>5}", "ID", "NAME", "SLUG", "POSTS", w = NAME_WIDTH);
    for category in &pager.data {
        println!(
            "{:>6}  {:<w$}  {:<24}  {:>5}",
            category.category_id.map(|id| id.to_string()).unwrap_or_default(),
            truncate_string(&category.display_name, NAME_WIDTH),
            truncate_string(&category.slug, 24),
            category.post_count,
            w = NAME_WIDTH
        );
    }
    page_footer(&pager);
    Ok(())
}

fn print_menu_item(item: &MenuItem, depth: usize) {
    println!(
        "{:>6}  {}{}  ->  {}",
        item.menu_item_id,
        "  ".repeat(depth),
        item.display_name,
        item.href
    );
    for child in &item.children {
        print_menu_item(child, depth + 1);
    }
}

pub async fn menus(ctx: &AppContext, items: Option<i64>) -> Result<()> {
    enter(ctx, Route::Menu)?;

    if let Some(menu_id) = items {
        let tree = ctx.api.menu_items(menu_id, true).await?;
        for item in &tree {
            print_menu_item(item, 0);
        }
        let count: usize = tree.iter().map(MenuItem::subtree_len).sum();
        println!("\n{} items", count);
        return Ok(());
    }

    let pager = ctx.api.menus(0, 0).await?;
    println!("{:>6}  {:<w$}  {:<4}  {}", "ID", "NAME", "MAIN", "CREATED", w = NAME_WIDTH);
    for menu in &pager.data {
        println!(
            "{:>6}  {:<w$}  {:<4}  {}",
            menu.menu_id,
            truncate_string(&menu.display_name, NAME_WIDTH),
            if menu.is_main { "yes" } else { "" },
            format_timestamp(menu.create_time),
            w = NAME_WIDTH
        );
    }
    Ok(())
}

pub async fn links(ctx: &AppContext, page: u32, size: Option<u32>) -> Result<()> {
    enter(ctx, Route::Link)?;
    let size = size.unwrap_or(ctx.preferences.get().link_page_size);
    let pager = ctx.api.links(page, size, LinkSort::default()).await?;

    println!("{:>6}  {:<w$}  {:>4}  {}", "ID", "NAME", "PRIO", "URL", w = NAME_WIDTH);
    for link in &pager.data {
        println!(
            "{:>6}  {:<w$}  {:>4}  {}",
            link.link_id,
            truncate_string(&link.display_name, NAME_WIDTH),
            link.priority,
            link.url,
            w = NAME_WIDTH
        );
    }
    page_footer(&pager);
    Ok(())
}

pub async fn diaries(ctx: &AppContext, page: u32, size: Option<u32>) -> Result<()> {
    // Diaries are managed from the overview page
    enter(ctx, Route::Main)?;
    let size = size.unwrap_or(ctx.preferences.get().diary_page_size);
    let pager = ctx.api.diaries(page, size, DiarySort::default()).await?;

    for diary in &pager.data {
        let preview = diary.content.split_whitespace().collect::<Vec<_>>().join(" ");
        println!(
            "{:>6}  {}  {}",
            diary.diary_id,
            format_timestamp(diary.create_time),
            truncate_string(&preview, PREVIEW_WIDTH)
        );
    }
    page_footer(&pager);
    Ok(())
}

pub async fn files(ctx: &AppContext, page: u32, size: Option<u32>, key: Option<String>) -> Result<()> {
    enter(ctx, Route::Attachment)?;
    let size = size.unwrap_or(ctx.preferences.get().file_page_size);
    let pager = ctx
        .api
        .files(page, size, Some(FileSort::default()), None, key.as_deref())
        .await?;

    println!("{:>6}  {:<w$}  {:>9}  {}", "ID", "NAME", "SIZE", "URL", w = NAME_WIDTH);
    for file in &pager.data {
        println!(
            "{:>6}  {:<w$}  {:>9}  {}",
            file.file_id,
            truncate_string(&file.display_name, NAME_WIDTH),
            format_size(file.size),
            ctx.config.image_url(&file.url),
            w = NAME_WIDTH
        );
    }
    page_footer(&pager);
    Ok(())
}

/// Public blog information, plus ICP filing numbers when logged in.
pub async fn blog(ctx: &AppContext) -> Result<()> {
    let info = ctx.api.blog_info().await?;
    if !info.is_initialized() {
        println!("This blog has not been set up yet.");
        return Ok(());
    }

    println!("Title:      {}", info.title.as_deref().unwrap_or_default());
    if let Some(subtitle) = &info.subtitle {
        println!("Subtitle:   {}", subtitle);
    }
    if let Some(blogger) = &info.blogger {
        println!("Blogger:    {}", blogger);
    }
    if let Some(created) = info.create_date {
        println!("Created:    {}", format_timestamp(created));
    }

    if ctx.session.is_login() {
        let icp = ctx.api.icp().await?;
        if let Some(number) = icp.icp.as_deref().filter(|s| !s.is_empty()) {
            println!("ICP:        {}", number);
        }
        if let Some(number) = icp.public.as_deref().filter(|s| !s.is_empty()) {
            println!("Public ICP: {}", number);
        }
    }
    Ok(())
}

/// A page name such as `tag`, or a location path such as `#/tag`.
fn resolve_route(target: &str) -> Route {
    Route::from_name(target).unwrap_or_else(|| Route::from_path(target))
}

pub fn route(ctx: &AppContext, target: &str) -> Result<()> {
    match ctx.router().navigate(resolve_route(target)) {
        NavigationOutcome::Arrived { route, title } => {
            println!("{}  {}", route.path(), title);
        }
        NavigationOutcome::Cancelled => println!("cancelled"),
    }
    Ok(())
}

pub fn prefs(ctx: &AppContext, theme: Option<Theme>, page_size: Option<u32>) -> Result<()> {
    if page_size == Some(0) {
        bail!("Page size must be at least 1");
    }

    if let Some(theme) = theme {
        ctx.preferences.set_theme(theme)?;
    }
    if let Some(size) = page_size {
        ctx.preferences.update(|data| {
            data.post_page_size = size;
            data.tag_page_size = size;
            data.category_page_size = size;
            data.link_page_size = size;
            data.diary_page_size = size;
            data.file_page_size = size;
        })?;
    }

    let data = ctx.preferences.get();
    println!(
        "theme            {}",
        match data.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    );
    println!("sider collapsed  {}", data.sider_collapsed);
    println!("post page size   {}", data.post_page_size);
    println!("tag page size    {}", data.tag_page_size);
    println!("auto save        {}s", data.post_auto_save_secs);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nola_core::{MemoryStore, Session, TracingNotifier};
    use std::sync::Arc;

    fn context() -> AppContext {
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            encryption_secret: "cli-secret".to_string(),
            ..Config::default()
        };
        AppContext::with_backend(config, Arc::new(MemoryStore::new()), Arc::new(TracingNotifier))
            .unwrap()
    }

    #[test]
    fn test_pages_need_session() {
        let ctx = context();
        let err = enter(&ctx, Route::Post).unwrap_err();
        assert!(err.to_string().contains("nola login"));

        ctx.session.login(Session::new("admin", "abc123")).unwrap();
        assert!(enter(&ctx, Route::Post).is_ok());
        assert!(enter(&ctx, Route::Login).is_err());
    }

    #[test]
    fn test_prefs_page_size() {
        let ctx = context();
        prefs(&ctx, Some(Theme::Dark), Some(25)).unwrap();
        let data = ctx.preferences.get();
        assert_eq!(data.theme, Theme::Dark);
        assert_eq!(data.file_page_size, 25);
        assert!(prefs(&ctx, None, Some(0)).is_err());
    }

    #[test]
    fn test_prefs_rejects_before_saving() {
        let ctx = context();
        assert!(prefs(&ctx, Some(Theme::Dark), Some(0)).is_err());
        let data = ctx.preferences.get();
        assert_eq!(data.theme, Theme::Light);
        assert_ne!(data.post_page_size, 0);
    }

    #[test]
    fn test_route_accepts_names_and_paths() {
        assert_eq!(resolve_route("tag"), Route::Tag);
        assert_eq!(resolve_route("#/post"), Route::Post);
        assert_eq!(resolve_route("/"), Route::Login);
        assert_eq!(resolve_route("nowhere"), Route::NotFound);
    }

    #[test]
    fn test_only_server_rejection_retries_password() {
        let rejected = anyhow::Error::new(ApiError::Application {
            code: 400,
            message: "Wrong password".to_string(),
        });
        assert!(saved_password_rejected(&rejected));
        assert!(!saved_password_rejected(&anyhow::Error::new(ApiError::SessionExpired)));
        assert!(!saved_password_rejected(&anyhow::anyhow!("keychain locked")));
    }
}
