//! Screens, their paths and access rules.

use crate::domain::{MovieId, SessionState};
use std::fmt;

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    Public,
    /// Only anonymous users; authenticated users land on the dashboard.
    GuestOnly,
    /// Only authenticated users; anonymous users land on the login screen.
    Protected,
}

/// Application screens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Signup,
    Dashboard,
    AddMovie,
    EditMovie(MovieId),
}

impl Route {
    /// Maps a path to a route. Unknown paths fall back to [`Route::Home`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["dashboard"] => Self::Dashboard,
            ["add"] => Self::AddMovie,
            ["edit", id] => Self::EditMovie(MovieId::from(*id)),
            _ => Self::Home,
        }
    }

    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Home => Access::Public,
            Self::Login | Self::Signup => Access::GuestOnly,
            Self::Dashboard | Self::AddMovie | Self::EditMovie(_) => Access::Protected,
        }
    }

    /// Applies the access rule of this route for the given session.
    #[must_use]
    pub fn resolve(self, session: &SessionState) -> Self {
        match (self.access(), session.is_authenticated()) {
            (Access::GuestOnly, true) => Self::Dashboard,
            (Access::Protected, false) => Self::Login,
            _ => self,
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Signup => "Sign up",
            Self::Dashboard => "Dashboard",
            Self::AddMovie => "Add Movie",
            Self::EditMovie(_) => "Edit Movie",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Login => f.write_str("/login"),
            Self::Signup => f.write_str("/signup"),
            Self::Dashboard => f.write_str("/dashboard"),
            Self::AddMovie => f.write_str("/add"),
            Self::EditMovie(id) => write!(f, "/edit/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths_and_falls_back_home() {
        assert_eq!(Route::parse("/dashboard/"), Route::Dashboard);
        assert_eq!(Route::parse("edit/66a1"), Route::EditMovie(MovieId::from("66a1")));
        assert_eq!(Route::parse("/edit"), Route::Home);
        assert_eq!(Route::parse("/nowhere"), Route::Home);
        assert_eq!(Route::parse("/"), Route::Home);
    }

    #[test]
    fn guards_redirect_by_session() {
        let anonymous = SessionState::Anonymous;
        let signed_in = SessionState::Authenticated("t".into());

        assert_eq!(Route::AddMovie.resolve(&anonymous), Route::Login);
        assert_eq!(Route::Login.resolve(&signed_in), Route::Dashboard);
        assert_eq!(Route::Signup.resolve(&anonymous), Route::Signup);
        assert_eq!(Route::Home.resolve(&signed_in), Route::Home);
        assert_eq!(
            Route::EditMovie(MovieId::from("x")).resolve(&signed_in),
            Route::EditMovie(MovieId::from("x"))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let route = Route::EditMovie(MovieId::from("abc"));
        assert_eq!(Route::parse(&route.to_string()), route);
    }
}
