//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings only; nothing in here knows
//! about stores or requests.

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub header: HeaderInfo,

    /// Present while the navigation panel is open.
    pub nav_panel: Option<NavPanel>,

    pub body: Body,

    pub footer: FooterInfo,
}

/// Brand, search box and user menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub brand: String,
    pub search_query: String,

    /// `Login` / `Sign up` for guests, `Logout` once signed in.
    pub user_menu: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPanel {
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub path: String,
    pub active: bool,
}

/// Screen-specific content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Home(HomeView),
    Dashboard(DashboardView),
    Auth(AuthView),
    Form(FormView),
    /// The edit screen is waiting for the catalog.
    Loading(String),
}

/// Movie strip with one featured movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub strip: Vec<StripItem>,
    pub featured: Option<FeaturedMovie>,
    pub loading: bool,
    pub error: Option<String>,
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripItem {
    /// One-based position used by the `select` command.
    pub number: usize,
    pub name: String,
    pub year: i32,
    pub is_featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedMovie {
    pub name: String,
    pub year: i32,
    pub plot: String,
    pub poster: String,
    pub producer: String,
    pub actors: String,
}

/// The movie table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub rows: Vec<MovieRow>,

    /// Edit/delete commands are only offered to signed-in users.
    pub show_actions: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    /// One-based serial number.
    pub sr: usize,
    pub id: String,
    pub profile: String,
    pub name: String,
    pub year: i32,
    pub producer: String,
    pub actors: String,
}

/// Login or sign-up screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub title: String,
    pub command: String,
    pub pending: bool,
    pub error: Option<String>,
}

/// Add or edit movie screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub sections: Vec<FormSection>,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSection {
    pub title: String,
    pub rows: Vec<FieldRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    /// Dotted key to pass to the `set` command.
    pub key: String,
    pub value: String,
    pub error: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command hints for the current screen.
    pub keybindings: String,
}

/// Shown when there is nothing to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
