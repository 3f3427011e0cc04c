//! Admin pages and the navigation guard in front of them.
//!
//! Every navigation is checked against the session: anonymous visitors are
//! sent to the login page and logged-in administrators are kept away from
//! it. A page may additionally ask to confirm before it is left (the post
//! editor does, to protect unsaved work).

use std::sync::Arc;

use tracing::debug;

use crate::auth::SessionStore;

/// Suffix for page titles
const TITLE_SUFFIX: &str = "Nola";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Main,
    Post,
    Tag,
    Category,
    Comment,
    Attachment,
    Link,
    Menu,
    Setting,
    Backup,
    System,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 13] = [
        Route::Login,
        Route::Main,
        Route::Post,
        Route::Tag,
        Route::Category,
        Route::Comment,
        Route::Attachment,
        Route::Link,
        Route::Menu,
        Route::Setting,
        Route::Backup,
        Route::System,
        Route::NotFound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Main => "main",
            Route::Post => "post",
            Route::Tag => "tag",
            Route::Category => "category",
            Route::Comment => "comment",
            Route::Attachment => "attachment",
            Route::Link => "link",
            Route::Menu => "menu",
            Route::Setting => "setting",
            Route::Backup => "backup",
            Route::System => "system",
            Route::NotFound => "404",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Main => "/main",
            Route::Post => "/post",
            Route::Tag => "/tag",
            Route::Category => "/category",
            Route::Comment => "/comment",
            Route::Attachment => "/attachment",
            Route::Link => "/link",
            Route::Menu => "/menu",
            Route::Setting => "/setting",
            Route::Backup => "/backup",
            Route::System => "/system",
            Route::NotFound => "/404",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Main => "Blog Overview",
            Route::Post => "Posts",
            Route::Tag => "Tags",
            Route::Category => "Categories",
            Route::Comment => "Comments",
            Route::Attachment => "Attachments",
            Route::Link => "Friend Links",
            Route::Menu => "Menus",
            Route::Setting => "Blog Settings",
            Route::Backup => "Backup",
            Route::System => "System",
            Route::NotFound => "404",
        }
    }

    /// Resolve a location path. Unknown paths land on the not-found page.
    pub fn from_path(path: &str) -> Route {
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL
            .iter()
            .copied()
            .find(|route| route.path() == path)
            .unwrap_or(Route::NotFound)
    }

    pub fn from_name(name: &str) -> Option<Route> {
        Route::ALL.iter().copied().find(|route| route.name() == name)
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.display_name(), TITLE_SUFFIX)
    }
}

/// Decision for a single navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed { route: Route, title: String },
    Redirect(Route),
}

pub struct NavigationGuard {
    session: Arc<SessionStore>,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn before_each(&self, to: Route) -> Navigation {
        let logged_in = self.session.is_login();
        match (to, logged_in) {
            (Route::Login, true) => Navigation::Redirect(Route::Main),
            (route, false) if route != Route::Login => Navigation::Redirect(Route::Login),
            (route, _) => Navigation::Proceed {
                route,
                title: route.title(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Arrived { route: Route, title: String },
    /// The current page's leave prompt was declined
    Cancelled,
}

type LeavePrompt = Box<dyn FnMut() -> bool + Send>;

/// Tracks the current page and applies the guard to every move.
pub struct Router {
    guard: NavigationGuard,
    current: Option<Route>,
    leave_prompt: Option<LeavePrompt>,
}

impl Router {
    pub fn new(guard: NavigationGuard) -> Self {
        Self {
            guard,
            current: None,
            leave_prompt: None,
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.current
    }

    /// Ask `prompt` before leaving the current page. Dropped once the page is left.
    pub fn set_leave_prompt<F>(&mut self, prompt: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.leave_prompt = Some(Box::new(prompt));
    }

    pub fn clear_leave_prompt(&mut self) {
        self.leave_prompt = None;
    }

    pub fn has_leave_prompt(&self) -> bool {
        self.leave_prompt.is_some()
    }

    pub fn navigate_path(&mut self, path: &str) -> NavigationOutcome {
        self.navigate(Route::from_path(path))
    }

    pub fn navigate(&mut self, to: Route) -> NavigationOutcome {
        let leaving = self.current.is_some_and(|current| current != to);
        if leaving {
            if let Some(prompt) = self.leave_prompt.as_mut() {
                if !prompt() {
                    debug!(to = to.name(), "Navigation cancelled by leave prompt");
                    return NavigationOutcome::Cancelled;
                }
            }
        }

        // Redirects only ever target Login (anonymous) or Main (logged in),
        // both of which the guard lets through, so this settles quickly.
        let mut target = to;
        loop {
            match self.guard.before_each(target) {
                Navigation::Redirect(next) => {
                    debug!(from = target.name(), to = next.name(), "Navigation redirected");
                    target = next;
                }
                Navigation::Proceed { route, title } => {
                    if self.current != Some(route) {
                        self.leave_prompt = None;
                    }
                    self.current = Some(route);
                    return NavigationOutcome::Arrived { route, title };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::storage::{MemoryStore, SecureStorage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session_store() -> Arc<SessionStore> {
        let storage = SecureStorage::new(Arc::new(MemoryStore::new()), "router-secret").unwrap();
        Arc::new(SessionStore::restore(Arc::new(storage)))
    }

    #[test]
    fn test_route_paths_roundtrip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), route);
            assert_eq!(Route::from_name(route.name()), Some(route));
        }
        assert_eq!(Route::from_path("/no/such/page"), Route::NotFound);
        assert_eq!(Route::from_path("#/tag/"), Route::Tag);
        assert_eq!(Route::from_path(""), Route::Login);
    }

    #[test]
    fn test_guard_when_logged_in() {
        let session = session_store();
        session.login(Session::new("admin", "abc123")).unwrap();
        let guard = NavigationGuard::new(session);

        assert_eq!(guard.before_each(Route::Login), Navigation::Redirect(Route::Main));
        assert_eq!(
            guard.before_each(Route::Post),
            Navigation::Proceed {
                route: Route::Post,
                title: "Posts - Nola".to_string()
            }
        );
    }

    #[test]
    fn test_guard_when_anonymous() {
        let guard = NavigationGuard::new(session_store());

        for route in Route::ALL.into_iter().filter(|r| *r != Route::Login) {
            assert_eq!(guard.before_each(route), Navigation::Redirect(Route::Login));
        }
        assert!(matches!(
            guard.before_each(Route::Login),
            Navigation::Proceed { route: Route::Login, .. }
        ));
    }

    #[test]
    fn test_router_follows_redirects() {
        let session = session_store();
        let mut router = Router::new(NavigationGuard::new(Arc::clone(&session)));

        let outcome = router.navigate_path("/tag");
        assert!(matches!(outcome, NavigationOutcome::Arrived { route: Route::Login, .. }));

        session.login(Session::new("admin", "abc123")).unwrap();
        let outcome = router.navigate(Route::Login);
        assert!(matches!(outcome, NavigationOutcome::Arrived { route: Route::Main, .. }));
        assert_eq!(router.current(), Some(Route::Main));
    }

    #[test]
    fn test_leave_prompt_only_on_its_page() {
        let session = session_store();
        session.login(Session::new("admin", "abc123")).unwrap();
        let mut router = Router::new(NavigationGuard::new(session));

        router.navigate(Route::Post);
        let asked = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&asked);
        router.set_leave_prompt(move || counter.fetch_add(1, Ordering::SeqCst) > 0);

        // Staying on the page does not ask
        router.navigate(Route::Post);
        assert_eq!(asked.load(Ordering::SeqCst), 0);

        // First attempt declined, second accepted
        assert_eq!(router.navigate(Route::Tag), NavigationOutcome::Cancelled);
        assert_eq!(router.current(), Some(Route::Post));
        assert!(matches!(router.navigate(Route::Tag), NavigationOutcome::Arrived { .. }));
        assert_eq!(asked.load(Ordering::SeqCst), 2);

        // Prompt went away with the page
        assert!(!router.has_leave_prompt());
        router.navigate(Route::Menu);
        assert_eq!(asked.load(Ordering::SeqCst), 2);
    }
}
