//! Redirect decisions for the navigation layer.

use std::fmt;

use super::model::SessionSnapshot;

/// Screens of the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    Login,
    Register,
    Home,
    Article(String),
    Bookmarks,
    History,
    Profile,
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone.
    Public,
    /// Signed-in users only; others are sent to the login screen.
    Protected,
    /// Signed-out users only; signed-in users are sent home.
    GuestOnly,
}

/// What the navigation layer should do for a requested route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// The session is still being restored; render nothing yet.
    Wait,
    Render,
    Redirect(Route),
}

impl Route {
    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Bookmarks | Route::Profile => RouteAccess::Protected,
            Route::Login | Route::Register => RouteAccess::GuestOnly,
            Route::Index | Route::Home | Route::Article(_) | Route::History => {
                RouteAccess::Public
            }
        }
    }

    /// Where to go after a successful sign-in or sign-up.
    pub fn after_sign_in() -> Self {
        Route::Home
    }

    /// Where to go after signing out.
    pub fn after_sign_out() -> Self {
        Route::Login
    }

    /// Decides whether `self` can be shown for the given session.
    pub fn resolve(&self, session: &SessionSnapshot) -> NavigationDecision {
        if session.loading {
            return NavigationDecision::Wait;
        }

        match (self.access(), session.authenticated) {
            (RouteAccess::Protected, false) => NavigationDecision::Redirect(Route::Login),
            (RouteAccess::GuestOnly, true) => NavigationDecision::Redirect(Route::Home),
            _ => NavigationDecision::Render,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Index => write!(f, "/"),
            Route::Login => write!(f, "/(auth)/login"),
            Route::Register => write!(f, "/(auth)/register"),
            Route::Home => write!(f, "/home"),
            Route::Article(id) => write!(f, "/article/{}", id),
            Route::Bookmarks => write!(f, "/bookmarks"),
            Route::History => write!(f, "/history"),
            Route::Profile => write!(f, "/profile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;

    fn loading() -> SessionSnapshot {
        SessionSnapshot {
            authenticated: false,
            user: None,
            loading: true,
        }
    }

    fn signed_out() -> SessionSnapshot {
        SessionSnapshot {
            authenticated: false,
            user: None,
            loading: false,
        }
    }

    fn signed_in() -> SessionSnapshot {
        SessionSnapshot {
            authenticated: true,
            user: Some(User {
                id: 1,
                email: "ana@example.com".to_string(),
                name: "Ana".to_string(),
                role: "user".to_string(),
            }),
            loading: false,
        }
    }

    #[test]
    fn test_everything_waits_while_loading() {
        for route in [Route::Home, Route::Bookmarks, Route::Login] {
            assert_eq!(route.resolve(&loading()), NavigationDecision::Wait);
        }
    }

    #[test]
    fn test_protected_routes_redirect_to_login() {
        assert_eq!(
            Route::Bookmarks.resolve(&signed_out()),
            NavigationDecision::Redirect(Route::Login)
        );
        assert_eq!(Route::Bookmarks.resolve(&signed_in()), NavigationDecision::Render);
    }

    #[test]
    fn test_guest_routes_redirect_home() {
        assert_eq!(
            Route::Login.resolve(&signed_in()),
            NavigationDecision::Redirect(Route::Home)
        );
        assert_eq!(Route::Register.resolve(&signed_out()), NavigationDecision::Render);
    }

    #[test]
    fn test_public_routes_always_render() {
        let article = Route::Article("42".to_string());
        assert_eq!(article.resolve(&signed_out()), NavigationDecision::Render);
        assert_eq!(article.resolve(&signed_in()), NavigationDecision::Render);
        assert_eq!(article.to_string(), "/article/42");
    }
}
