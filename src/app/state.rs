//! Application state management and view model computation.
//!
//! [`AppState`] aggregates the three stores with the per-screen state that
//! only the view layer cares about: the current route, the movie form, the
//! header search query and the featured movie on the home screen.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into a
//! [`ViewModel`](crate::ui::viewmodel::ViewModel). Listings on the home and
//! dashboard screens are filtered by the search query with a fuzzy matcher.

use super::routes::Route;
use crate::domain::{Movie, MovieId};
use crate::form::{FieldPath, MovieField, MovieForm, PersonField, PersonForm};
use crate::store::{CatalogStore, OpKind, SessionStore, UiStore};
use crate::ui::viewmodel::{
    AuthView, Body, DashboardView, EmptyState, FeaturedMovie, FieldRow, FooterInfo, FormSection,
    FormView, HeaderInfo, HomeView, MenuEntry, MovieRow, NavLink, NavPanel, StripItem, ViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Central application state container.
#[derive(Debug, Default)]
pub struct AppState {
    pub session: SessionStore,
    pub catalog: CatalogStore,
    pub ui: UiStore,

    /// Screen currently shown, after access rules were applied.
    pub route: Route,

    /// Form of the add/edit screen, `None` elsewhere.
    pub form: Option<MovieForm>,

    /// Edit target waiting for the catalog to load.
    pub pending_edit: Option<MovieId>,

    /// Sequence number of the create/update whose success leaves the form.
    pub awaiting_submit: Option<u64>,

    /// Header search box content.
    pub search_query: String,

    /// Index of the featured movie within the filtered listing.
    pub featured: usize,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Movies whose name fuzzily matches every whitespace-separated token of
    /// the search query, in catalog order.
    #[must_use]
    pub fn filtered_movies(&self) -> Vec<&Movie> {
        let tokens: Vec<String> = self
            .search_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if tokens.is_empty() {
            return self.catalog.movies().iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        let filtered: Vec<&Movie> = self
            .catalog
            .movies()
            .iter()
            .filter(|movie| {
                let name = movie.name.to_lowercase();
                tokens.iter().all(|token| matcher.fuzzy_match(&name, token).is_some())
            })
            .collect();

        tracing::debug!(
            total = self.catalog.movies().len(),
            filtered = filtered.len(),
            "search filter applied"
        );
        filtered
    }

    /// Movie shown at one-based position `number` of the current listing.
    #[must_use]
    pub fn listed_movie(&self, number: usize) -> Option<&Movie> {
        number
            .checked_sub(1)
            .and_then(|index| self.filtered_movies().get(index).copied())
    }

    #[must_use]
    pub fn featured_movie(&self) -> Option<&Movie> {
        let movies = self.filtered_movies();
        movies
            .get(self.featured)
            .or_else(|| movies.first())
            .copied()
    }

    /// Computes a renderable view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ViewModel {
        let body = match &self.route {
            Route::Home => Body::Home(self.compute_home()),
            Route::Dashboard => Body::Dashboard(self.compute_dashboard()),
            Route::Login => Body::Auth(self.compute_auth("Login", "login <username> <password>")),
            Route::Signup => {
                Body::Auth(self.compute_auth("Sign up", "signup <username> <password>"))
            }
            Route::AddMovie | Route::EditMovie(_) => self.form.as_ref().map_or_else(
                || Body::Loading("Loading...".to_string()),
                |form| Body::Form(self.compute_form(form)),
            ),
        };

        ViewModel {
            header: self.compute_header(),
            nav_panel: self.ui.nav_open().then(|| self.compute_nav_panel()),
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let entry = |label: &str, command: &str| MenuEntry {
            label: label.to_string(),
            command: command.to_string(),
        };
        let user_menu = if self.session.is_authenticated() {
            vec![entry("Logout", "logout")]
        } else {
            vec![entry("Login", "open /login"), entry("Sign up", "open /signup")]
        };
        HeaderInfo {
            brand: "Cinedex".to_string(),
            search_query: self.search_query.clone(),
            user_menu,
        }
    }

    fn compute_nav_panel(&self) -> NavPanel {
        let mut targets = vec![Route::Home];
        if self.session.is_authenticated() {
            targets.extend([Route::Dashboard, Route::AddMovie]);
        } else {
            targets.extend([Route::Login, Route::Signup]);
        }
        let links = targets
            .into_iter()
            .map(|route| NavLink {
                label: route.title().to_string(),
                path: route.to_string(),
                active: route == self.route,
            })
            .collect();
        NavPanel { links }
    }

    fn compute_home(&self) -> HomeView {
        let movies = self.filtered_movies();
        let featured_index = if self.featured < movies.len() { self.featured } else { 0 };
        let strip = movies
            .iter()
            .enumerate()
            .map(|(index, movie)| StripItem {
                number: index + 1,
                name: movie.name.clone(),
                year: movie.year_of_release,
                is_featured: index == featured_index,
            })
            .collect();
        let featured = movies.get(featured_index).map(|movie| FeaturedMovie {
            name: movie.name.clone(),
            year: movie.year_of_release,
            plot: movie.plot.clone(),
            poster: movie.poster.clone(),
            producer: movie.producer_name().to_string(),
            actors: movie.actor_names(),
        });

        HomeView {
            strip,
            featured,
            loading: self.catalog.state(OpKind::Fetch).is_pending(),
            error: self.catalog.error().map(str::to_string),
            empty_state: movies.is_empty().then(|| self.empty_listing()),
        }
    }

    fn compute_dashboard(&self) -> DashboardView {
        let movies = self.filtered_movies();
        let rows = movies
            .iter()
            .enumerate()
            .map(|(index, movie)| MovieRow {
                sr: index + 1,
                id: movie.id.to_string(),
                profile: movie.poster.clone(),
                name: movie.name.clone(),
                year: movie.year_of_release,
                producer: movie.producer_name().to_string(),
                actors: movie.actor_names(),
            })
            .collect();

        DashboardView {
            rows,
            show_actions: self.session.is_authenticated(),
            loading: self.catalog.loading(),
            error: self.catalog.error().map(str::to_string),
            empty_state: movies.is_empty().then(|| self.empty_listing()),
        }
    }

    fn empty_listing(&self) -> EmptyState {
        if self.search_query.trim().is_empty() || self.catalog.movies().is_empty() {
            EmptyState {
                message: "No movies available".to_string(),
                subtitle: if self.session.is_authenticated() {
                    "Use `open /add` to add one".to_string()
                } else {
                    "Log in to add movies".to_string()
                },
            }
        } else {
            EmptyState {
                message: "No movies available".to_string(),
                subtitle: format!("Nothing matches \"{}\"", self.search_query.trim()),
            }
        }
    }

    fn compute_auth(&self, title: &str, command: &str) -> AuthView {
        AuthView {
            title: title.to_string(),
            command: command.to_string(),
            pending: self.session.pending(),
            error: self.session.error().map(str::to_string),
        }
    }

    fn compute_form(&self, form: &MovieForm) -> FormView {
        let row = |path: FieldPath, value: String| FieldRow {
            key: path.command_key(),
            value,
            error: form.errors.get(path).map(str::to_string),
        };

        let poster = match (&form.poster, &form.current_poster) {
            (Some(upload), _) => format!("{} ({} bytes)", upload.file_name, upload.bytes.len()),
            (None, Some(url)) => url.clone(),
            (None, None) => String::new(),
        };
        let movie = FormSection {
            title: "Movie".to_string(),
            rows: vec![
                row(FieldPath::Movie(MovieField::Name), form.name.clone()),
                row(
                    FieldPath::Movie(MovieField::YearOfRelease),
                    form.year_of_release.map(|y| y.to_string()).unwrap_or_default(),
                ),
                row(FieldPath::Movie(MovieField::Plot), form.plot.clone()),
                row(FieldPath::Movie(MovieField::Poster), poster),
            ],
        };

        let person_rows = |person: &PersonForm, path: &dyn Fn(PersonField) -> FieldPath| {
            PersonField::ALL
                .into_iter()
                .map(|field| {
                    let value = match field {
                        PersonField::Name => person.name.clone(),
                        PersonField::Gender => person
                            .gender
                            .map(|g| g.code().to_string())
                            .unwrap_or_default(),
                        PersonField::Dob => person
                            .dob
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default(),
                        PersonField::Bio => person.bio.clone(),
                    };
                    row(path(field), value)
                })
                .collect::<Vec<_>>()
        };

        let mut sections = vec![
            movie,
            FormSection {
                title: "Producer".to_string(),
                rows: person_rows(&form.producer, &FieldPath::Producer),
            },
        ];
        for (index, actor) in form.actors.iter().enumerate() {
            sections.push(FormSection {
                title: format!("Actor {index}"),
                rows: person_rows(actor, &|field| FieldPath::actor(index, field)),
            });
        }

        let (kind, title) = match &self.route {
            Route::EditMovie(_) => (OpKind::Update, "Edit Movie"),
            _ => (OpKind::Create, "Add Movie"),
        };
        FormView {
            title: title.to_string(),
            sections,
            submitting: self.catalog.state(kind).is_pending(),
            error: self.catalog.state(kind).error().map(str::to_string),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match &self.route {
            Route::Home => "select <n>: feature  search <text>  nav  help  quit",
            Route::Dashboard if self.session.is_authenticated() => {
                "open /edit/<id>  delete <sr>  open /add  refresh  search <text>  help  quit"
            }
            Route::Dashboard => "refresh  search <text>  help  quit",
            Route::Login => "login <username> <password>  open /signup  help  quit",
            Route::Signup => "signup <username> <password>  open /login  help  quit",
            Route::AddMovie | Route::EditMovie(_) => {
                "set <key> <value>  poster <file>  actor add|remove <i>  submit  cancel"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CatalogOutcome;

    fn movie(id: &str, name: &str) -> Movie {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": name,
            "year_of_release": 1999,
            "plot": "plot",
            "poster": format!("http://cdn/{id}.jpg"),
            "producer_id": null,
            "actors": [
                {"name": "Keanu Reeves", "gender": "M", "dob": "1964-09-02", "bio": "b"},
                {"name": "Carrie-Anne Moss", "gender": "F", "dob": "1967-08-21", "bio": "b"}
            ]
        }))
        .unwrap()
    }

    fn with_movies(names: &[&str]) -> AppState {
        let mut state = AppState::new();
        let ticket = state.catalog.begin(OpKind::Fetch, None).unwrap();
        let movies = names
            .iter()
            .enumerate()
            .map(|(i, name)| movie(&format!("m{i}"), name))
            .collect();
        state.catalog.apply(&ticket, CatalogOutcome::Fetched(movies));
        state
    }

    #[test]
    fn search_filters_by_fuzzy_name() {
        let mut state = with_movies(&["The Matrix", "Heat", "Matrix Reloaded"]);
        state.search_query = "matrix".to_string();
        let names: Vec<&str> = state.filtered_movies().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["The Matrix", "Matrix Reloaded"]);
    }

    #[test]
    fn dashboard_rows_show_na_and_joined_actors() {
        let mut state = with_movies(&["The Matrix"]);
        state.route = Route::Dashboard;
        let Body::Dashboard(view) = state.compute_viewmodel().body else {
            panic!("expected dashboard");
        };
        assert!(!view.show_actions);
        assert_eq!(view.rows[0].sr, 1);
        assert_eq!(view.rows[0].producer, "N/A");
        assert_eq!(view.rows[0].actors, "Keanu Reeves, Carrie-Anne Moss");
        assert!(view.empty_state.is_none());
    }

    #[test]
    fn empty_dashboard_says_no_movies() {
        let mut state = with_movies(&[]);
        state.route = Route::Dashboard;
        state.session.restore("t".into());
        let Body::Dashboard(view) = state.compute_viewmodel().body else {
            panic!("expected dashboard");
        };
        assert!(view.show_actions);
        assert_eq!(view.empty_state.unwrap().message, "No movies available");
    }

    #[test]
    fn featured_movie_falls_back_to_first() {
        let mut state = with_movies(&["A", "B"]);
        state.featured = 1;
        assert_eq!(state.featured_movie().unwrap().name, "B");
        state.featured = 7;
        assert_eq!(state.featured_movie().unwrap().name, "A");
    }

    #[test]
    fn user_menu_follows_session() {
        let mut state = AppState::new();
        let labels = |state: &AppState| {
            state
                .compute_viewmodel()
                .header
                .user_menu
                .into_iter()
                .map(|e| e.label)
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(&state), ["Login", "Sign up"]);
        state.session.restore("t".into());
        assert_eq!(labels(&state), ["Logout"]);
    }

    #[test]
    fn nav_panel_only_when_open() {
        let mut state = AppState::new();
        assert!(state.compute_viewmodel().nav_panel.is_none());
        state.ui.toggle_nav();
        let panel = state.compute_viewmodel().nav_panel.unwrap();
        assert!(panel.links.iter().any(|l| l.path == "/" && l.active));
    }

    #[test]
    fn form_view_lists_actor_sections_with_errors() {
        let mut state = AppState::new();
        state.route = Route::AddMovie;
        let mut form = MovieForm::new(crate::form::FormMode::Create);
        form.add_actor();
        form.submit().unwrap_err();
        state.form = Some(form);

        let Body::Form(view) = state.compute_viewmodel().body else {
            panic!("expected form");
        };
        assert_eq!(view.title, "Add Movie");
        assert_eq!(view.sections.len(), 4);
        let dob = &view.sections[1].rows[2];
        assert_eq!(dob.key, "producer.dob");
        assert_eq!(dob.error.as_deref(), Some("Producer DOB is required"));
        assert_eq!(view.sections[3].rows[0].key, "actor.1.name");
    }
}
