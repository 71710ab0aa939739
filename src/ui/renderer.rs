//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → ViewModel → render → text
//! ```

use crate::ui::components;
use crate::ui::viewmodel::{Body, ViewModel};
use std::io::{self, Write};

/// Narrowest layout the components are laid out for.
const MIN_COLS: usize = 40;

/// Writes one frame for `vm` to `out`.
///
/// Layout: header, navigation panel (when open), the screen body, footer.
/// Nothing is cleared or repositioned, so the output can go to a pipe.
///
/// # Errors
///
/// Returns the first write error from `out`.
///
/// # Example
///
/// ```rust
/// use cinedex::app::AppState;
/// use cinedex::ui::render;
///
/// let state = AppState::new();
/// let mut frame = Vec::new();
/// render(&state.compute_viewmodel(), &mut frame, 80)?;
/// assert!(String::from_utf8_lossy(&frame).contains("Cinedex"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render<W: Write>(vm: &ViewModel, out: &mut W, cols: usize) -> io::Result<()> {
    let cols = cols.max(MIN_COLS);

    components::render_header(out, &vm.header, cols)?;
    if let Some(panel) = &vm.nav_panel {
        components::render_nav_panel(out, panel, cols)?;
    }

    match &vm.body {
        Body::Home(home) => components::render_home(out, home, cols)?,
        Body::Dashboard(dashboard) => components::render_dashboard(out, dashboard, cols)?,
        Body::Auth(auth) => components::render_auth(out, auth)?,
        Body::Form(form) => components::render_form(out, form, cols)?,
        Body::Loading(message) => writeln!(out, "{message}")?,
    }

    components::render_footer(out, &vm.footer, cols)?;
    out.flush()
}

/// Convenience wrapper that renders into a `String`.
#[must_use]
pub fn render_to_string(vm: &ViewModel, cols: usize) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render(vm, &mut buffer, cols);
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{
        DashboardView, EmptyState, FieldRow, FooterInfo, FormSection, FormView, HeaderInfo,
        MenuEntry, MovieRow, NavLink, NavPanel,
    };

    fn frame(body: Body, nav_panel: Option<NavPanel>) -> ViewModel {
        ViewModel {
            header: HeaderInfo {
                brand: "Cinedex".to_string(),
                search_query: String::new(),
                user_menu: vec![MenuEntry {
                    label: "Logout".to_string(),
                    command: "logout".to_string(),
                }],
            },
            nav_panel,
            body,
            footer: FooterInfo {
                keybindings: "help  quit".to_string(),
            },
        }
    }

    fn dashboard(rows: Vec<MovieRow>, show_actions: bool) -> DashboardView {
        DashboardView {
            rows,
            show_actions,
            loading: false,
            error: None,
            empty_state: None,
        }
    }

    fn row() -> MovieRow {
        MovieRow {
            sr: 1,
            id: "66a1f0".to_string(),
            profile: String::new(),
            name: "Inception".to_string(),
            year: 2010,
            producer: "N/A".to_string(),
            actors: "Leonardo DiCaprio, Elliot Page".to_string(),
        }
    }

    #[test]
    fn dashboard_rows_show_actions_only_when_allowed() {
        let signed_in = render_to_string(&frame(Body::Dashboard(dashboard(vec![row()], true)), None), 120);
        assert!(signed_in.contains("ID (edit/delete)"));
        assert!(signed_in.contains("66a1f0"));
        assert!(signed_in.contains("Leonardo DiCaprio, Elliot Page"));

        let guest = render_to_string(&frame(Body::Dashboard(dashboard(vec![row()], false)), None), 120);
        assert!(!guest.contains("66a1f0"));
        assert!(guest.contains("Inception"));
        assert!(guest.contains("N/A"));
    }

    #[test]
    fn empty_dashboard_shows_message() {
        let mut view = dashboard(vec![], false);
        view.empty_state = Some(EmptyState {
            message: "No movies available".to_string(),
            subtitle: "Log in to add movies".to_string(),
        });
        view.error = Some("Request failed with status code 500".to_string());

        let text = render_to_string(&frame(Body::Dashboard(view), None), 80);
        assert!(text.contains("No movies available"));
        assert!(text.contains("error: Request failed with status code 500"));
    }

    #[test]
    fn form_lists_keys_and_errors() {
        let form = FormView {
            title: "Add Movie".to_string(),
            sections: vec![FormSection {
                title: "Producer".to_string(),
                rows: vec![FieldRow {
                    key: "producer.dob".to_string(),
                    value: String::new(),
                    error: Some("Producer Date of Birth is required".to_string()),
                }],
            }],
            submitting: false,
            error: None,
        };

        let text = render_to_string(&frame(Body::Form(form), None), 80);
        assert!(text.contains("producer.dob"));
        assert!(text.contains("! Producer Date of Birth is required"));
    }

    #[test]
    fn nav_panel_marks_active_link() {
        let panel = NavPanel {
            links: vec![NavLink {
                label: "Dashboard".to_string(),
                path: "/dashboard".to_string(),
                active: true,
            }],
        };
        let text = render_to_string(&frame(Body::Loading("Loading...".to_string()), Some(panel)), 80);
        assert!(text.contains("> Dashboard"));
        assert!(text.contains("Loading..."));
        assert!(text.contains("Logout (logout)"));
    }
}
