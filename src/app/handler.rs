//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes in the
//! interactive runtime. It applies pure store transitions and returns the
//! side effects to perform: API requests for the worker, confirmation
//! prompts, credential changes and notices.
//!
//! # Event Types
//!
//! - **Navigation**: `Navigate`, `ToggleNav`, `SetNav`
//! - **Session**: `Login`, `Signup`, `Logout`, `SessionRestored`
//! - **Listing**: `Search`, `SelectMovie`, `Refresh`, `RequestDelete`, `DeleteConfirmed`
//! - **Form**: `Form` with a [`FormEvent`]
//! - **Worker**: `Api` with the [`ApiResponse`] of an earlier request
//!
//! The returned flag tells the runtime whether the screen needs a redraw.

use super::actions::{Action, Confirmation, Notice};
use super::routes::Route;
use crate::app::AppState;
use crate::domain::{Credentials, MovieId, Result};
use crate::form::{FieldPath, FormMode, MovieForm, PosterUpload};
use crate::store::{Applied, CatalogOutcome, OpKind, Ticket};
use crate::worker::{ApiRequest, ApiResponse};

/// Message shown when a submission is blocked by validation.
pub const INCOMPLETE_FORM: &str = "Please fill out all required fields.";

/// Message shown when the edit target is not in the catalog.
pub const MOVIE_NOT_FOUND: &str = "Movie not found.";

/// Message shown when a delete is attempted without a session.
pub const SIGNED_OUT: &str = "Log in to manage movies.";

/// Events triggered by user input or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Opens a screen. Access rules may redirect.
    Navigate(Route),
    ToggleNav,
    SetNav(bool),
    Login(Credentials),
    Signup(Credentials),
    Logout,
    /// A token read from the session file at startup.
    SessionRestored(String),
    /// Replaces the header search query.
    Search(String),
    /// Features the movie at a one-based position of the listing.
    SelectMovie(usize),
    Form(FormEvent),
    /// Asks for confirmation before deleting.
    RequestDelete(MovieId),
    DeleteConfirmed(MovieId),
    Refresh,
    Api(ApiResponse),
}

/// Edits on the add/edit screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SetField { path: FieldPath, value: String },
    SetPoster(Option<PosterUpload>),
    AddActor,
    RemoveActor(usize),
    Submit,
    Cancel,
}

impl Event {
    /// Variant name, safe to log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Navigate(_) => "navigate",
            Self::ToggleNav => "toggle_nav",
            Self::SetNav(_) => "set_nav",
            Self::Login(_) => "login",
            Self::Signup(_) => "signup",
            Self::Logout => "logout",
            Self::SessionRestored(_) => "session_restored",
            Self::Search(_) => "search",
            Self::SelectMovie(_) => "select_movie",
            Self::Form(_) => "form",
            Self::RequestDelete(_) => "request_delete",
            Self::DeleteConfirmed(_) => "delete_confirmed",
            Self::Refresh => "refresh",
            Self::Api(_) => "api_response",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// Whether the screen should be redrawn, and the actions to run in order.
///
/// # Errors
///
/// Currently every failure is reported through [`Action::Notify`] or the
/// stores; the `Result` leaves room for failures the runtime must see.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Navigate(route) => Ok((true, navigate(state, route.clone()))),
        Event::ToggleNav => {
            state.ui.toggle_nav();
            Ok((true, vec![]))
        }
        Event::SetNav(open) => {
            let changed = state.ui.nav_open() != *open;
            state.ui.set_nav(*open);
            Ok((changed, vec![]))
        }
        Event::Login(credentials) | Event::Signup(credentials) => {
            if state.session.pending() {
                tracing::debug!("authentication already in flight");
                return Ok((false, vec![]));
            }
            let attempt = state.session.begin();
            let request = if matches!(event, Event::Login(_)) {
                ApiRequest::login(attempt, credentials.clone())
            } else {
                ApiRequest::signup(attempt, credentials.clone())
            };
            Ok((true, vec![Action::Dispatch(request)]))
        }
        Event::Logout => {
            tracing::info!("logging out");
            state.session.clear();
            let mut actions = vec![Action::SetCredential(None), Action::PersistSession(None)];
            actions.extend(navigate(state, Route::Login));
            Ok((true, actions))
        }
        Event::SessionRestored(token) => {
            state.session.restore(token.clone());
            let mut actions = vec![Action::SetCredential(Some(token.clone()))];
            let current = state.route.clone();
            if current.clone().resolve(state.session.state()) != current {
                actions.extend(navigate(state, current));
            }
            Ok((true, actions))
        }
        Event::Search(query) => {
            state.search_query = query.trim().to_string();
            state.featured = 0;
            tracing::trace!(query = %state.search_query, "search query updated");
            Ok((true, vec![]))
        }
        Event::SelectMovie(number) => {
            let count = state.filtered_movies().len();
            if *number == 0 || *number > count {
                let notice = Notice::error(format!("There is no movie #{number}."));
                return Ok((false, vec![Action::Notify(notice)]));
            }
            state.featured = number - 1;
            Ok((true, vec![]))
        }
        Event::Form(form_event) => handle_form_event(state, form_event),
        Event::RequestDelete(_) | Event::DeleteConfirmed(_) if !state.session.is_authenticated() => {
            let notice = Notice::error(SIGNED_OUT);
            Ok((false, vec![Action::Notify(notice)]))
        }
        Event::RequestDelete(id) => {
            Ok((false, vec![Action::Confirm(Confirmation::DeleteMovie(id.clone()))]))
        }
        Event::DeleteConfirmed(id) => match state.catalog.begin(OpKind::Delete, Some(id.clone())) {
            Ok(ticket) => {
                tracing::debug!(%id, "deleting movie");
                let request = ApiRequest::delete_movie(ticket, id.clone());
                Ok((true, vec![Action::Dispatch(request)]))
            }
            Err(e) => Ok((false, vec![Action::Notify(Notice::error(e.to_string()))])),
        },
        Event::Refresh => {
            let actions: Vec<Action> = start_fetch(state).into_iter().collect();
            Ok((!actions.is_empty(), actions))
        }
        Event::Api(response) => handle_api_response(state, response),
    }
}

fn handle_form_event(state: &mut AppState, event: &FormEvent) -> Result<(bool, Vec<Action>)> {
    match event {
        FormEvent::Submit => return submit_form(state),
        FormEvent::Cancel => return Ok((true, navigate(state, Route::Dashboard))),
        _ => {}
    }

    let Some(form) = state.form.as_mut() else {
        tracing::debug!("form event without an open form");
        return Ok((false, vec![]));
    };

    let refused = match event {
        FormEvent::SetField { path, value } => form.set_text(*path, value).err(),
        FormEvent::SetPoster(poster) => {
            form.set_poster(poster.clone());
            None
        }
        FormEvent::AddActor => {
            form.add_actor();
            None
        }
        FormEvent::RemoveActor(index) => form.remove_actor(*index).err(),
        FormEvent::Submit | FormEvent::Cancel => None,
    };

    match refused {
        Some(notice) => Ok((false, vec![Action::Notify(Notice::error(notice.to_string()))])),
        None => Ok((true, vec![])),
    }
}

fn submit_form(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(form) = state.form.as_mut() else {
        return Ok((false, vec![]));
    };

    let submission = match form.submit() {
        Ok(submission) => submission,
        Err(errors) => {
            tracing::debug!(missing = errors.len(), "submission blocked by validation");
            return Ok((true, vec![Action::Notify(Notice::error(INCOMPLETE_FORM))]));
        }
    };

    let target = match &form.mode {
        FormMode::Create => None,
        FormMode::Edit(id) => Some(id.clone()),
    };
    let kind = if target.is_some() { OpKind::Update } else { OpKind::Create };

    let ticket = match state.catalog.begin(kind, target.clone()) {
        Ok(ticket) => ticket,
        Err(e) => return Ok((false, vec![Action::Notify(Notice::error(e.to_string()))])),
    };
    state.awaiting_submit = Some(ticket.seq);

    let request = match target {
        None => ApiRequest::create_movie(ticket, submission),
        Some(id) => ApiRequest::update_movie(ticket, id, submission),
    };
    Ok((true, vec![Action::Dispatch(request)]))
}

fn handle_api_response(state: &mut AppState, response: &ApiResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        ApiResponse::Authenticated { attempt, .. } | ApiResponse::AuthFailed { attempt, .. }
            if !state.session.is_current(*attempt) =>
        {
            tracing::debug!(attempt, "discarding stale authentication reply");
            Ok((false, vec![]))
        }
        ApiResponse::Authenticated { token, .. } => {
            state.session.resolve(Ok(token.clone()));
            let mut actions = vec![
                Action::SetCredential(Some(token.clone())),
                Action::PersistSession(Some(token.clone())),
            ];
            actions.extend(navigate(state, Route::Dashboard));
            Ok((true, actions))
        }
        ApiResponse::AuthFailed { message, .. } => {
            state.session.resolve(Err(message.clone()));
            Ok((true, vec![Action::Notify(Notice::error(message.clone()))]))
        }
        ApiResponse::Catalog { ticket, outcome } => Ok(apply_catalog_outcome(state, ticket, outcome)),
    }
}

fn apply_catalog_outcome(
    state: &mut AppState,
    ticket: &Ticket,
    outcome: &CatalogOutcome,
) -> (bool, Vec<Action>) {
    let failure = match outcome {
        CatalogOutcome::Failed(message) => Some(message.clone()),
        _ => None,
    };
    if state.catalog.apply(ticket, outcome.clone()) == Applied::Unknown {
        return (false, vec![]);
    }

    let mut actions = vec![];
    match ticket.kind {
        OpKind::Fetch => {
            if let Some(id) = state.pending_edit.take() {
                if state.route == Route::EditMovie(id.clone()) {
                    match failure {
                        Some(message) => {
                            actions.push(Action::Notify(Notice::error(message)));
                            actions.extend(navigate(state, Route::Dashboard));
                        }
                        None => actions.extend(populate_editor(state, &id)),
                    }
                }
            }
        }
        OpKind::Create | OpKind::Update => {
            if state.awaiting_submit == Some(ticket.seq) {
                state.awaiting_submit = None;
                match failure {
                    Some(message) => actions.push(Action::Notify(Notice::error(message))),
                    None => actions.extend(navigate(state, Route::Dashboard)),
                }
            }
        }
        OpKind::Delete => {
            if let Some(message) = failure {
                actions.push(Action::Notify(Notice::error(message)));
            }
        }
    }
    (true, actions)
}

/// Switches to `requested`, or wherever its access rule redirects, and
/// prepares that screen.
fn navigate(state: &mut AppState, requested: Route) -> Vec<Action> {
    let route = requested.clone().resolve(state.session.state());
    if route != requested {
        tracing::debug!(from = %requested, to = %route, "route redirected");
    }
    state.route = route.clone();
    state.form = None;
    state.pending_edit = None;

    match route {
        Route::Home | Route::Dashboard => start_fetch(state).into_iter().collect(),
        Route::AddMovie => {
            state.form = Some(MovieForm::new(FormMode::Create));
            vec![]
        }
        Route::EditMovie(id) => {
            if state.catalog.find(&id).is_ok() {
                return populate_editor(state, &id);
            }
            if state.catalog.movies().is_empty() {
                tracing::debug!(%id, "waiting for catalog before editing");
                state.pending_edit = Some(id);
                return start_fetch(state).into_iter().collect();
            }
            populate_editor(state, &id)
        }
        Route::Login | Route::Signup => vec![],
    }
}

fn populate_editor(state: &mut AppState, id: &MovieId) -> Vec<Action> {
    match state.catalog.find(id) {
        Ok(movie) => {
            state.form = Some(MovieForm::from_movie(movie));
            vec![]
        }
        Err(e) => {
            tracing::debug!(error = %e, "edit target missing");
            let mut actions = vec![Action::Notify(Notice::error(MOVIE_NOT_FOUND))];
            actions.extend(navigate(state, Route::Dashboard));
            actions
        }
    }
}

fn start_fetch(state: &mut AppState) -> Option<Action> {
    match state.catalog.begin(OpKind::Fetch, None) {
        Ok(ticket) => Some(Action::Dispatch(ApiRequest::fetch_movies(ticket))),
        Err(e) => {
            tracing::debug!(error = %e, "fetch skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;
    use crate::form::{MovieField, PersonField};

    fn movie(id: &str) -> Movie {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": format!("Movie {id}"),
            "year_of_release": 2010,
            "plot": "plot",
            "poster": "http://cdn/p.jpg",
            "producer_id": {"name": "P", "gender": "F", "dob": "1970-01-01", "bio": "b"},
            "actors": [{"name": "A", "gender": "M", "dob": "1980-01-01", "bio": "b"}]
        }))
        .unwrap()
    }

    fn dispatched(actions: &[Action]) -> Vec<&ApiRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Dispatch(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn notices(actions: &[Action]) -> Vec<&str> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Notify(notice) => Some(notice.message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn fetch_ticket(actions: &[Action]) -> Ticket {
        match dispatched(actions).first() {
            Some(ApiRequest::FetchMovies { ticket, .. }) => ticket.clone(),
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    fn auth_attempt(actions: &[Action]) -> u64 {
        match dispatched(actions).first() {
            Some(ApiRequest::Login { attempt, .. } | ApiRequest::Signup { attempt, .. }) => *attempt,
            other => panic!("expected an auth request, got {other:?}"),
        }
    }

    fn signed_in() -> AppState {
        let mut state = AppState::new();
        handle_event(&mut state, &Event::SessionRestored("t1".into())).unwrap();
        state
    }

    fn signed_in_with(ids: &[&str]) -> AppState {
        let mut state = signed_in();
        let (_, actions) = handle_event(&mut state, &Event::Navigate(Route::Dashboard)).unwrap();
        let ticket = fetch_ticket(&actions);
        let movies = ids.iter().map(|id| movie(id)).collect();
        handle_event(
            &mut state,
            &Event::Api(ApiResponse::Catalog {
                ticket,
                outcome: CatalogOutcome::Fetched(movies),
            }),
        )
        .unwrap();
        state
    }

    #[test]
    fn protected_route_redirects_anonymous_user_to_login() {
        let mut state = AppState::new();
        let (_, actions) = handle_event(&mut state, &Event::Navigate(Route::AddMovie)).unwrap();
        assert_eq!(state.route, Route::Login);
        assert!(actions.is_empty());
        assert!(state.form.is_none());
    }

    #[test]
    fn entering_home_fetches_once() {
        let mut state = AppState::new();
        let (_, first) = handle_event(&mut state, &Event::Navigate(Route::Home)).unwrap();
        assert_eq!(dispatched(&first).len(), 1);
        let (_, second) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn login_success_stores_token_and_opens_dashboard() {
        let mut state = AppState::new();
        let (_, actions) =
            handle_event(&mut state, &Event::Login(Credentials::new("a", "b"))).unwrap();
        assert!(matches!(dispatched(&actions).as_slice(), [ApiRequest::Login { .. }]));
        assert!(state.session.pending());

        let attempt = auth_attempt(&actions);
        let (_, actions) = handle_event(
            &mut state,
            &Event::Api(ApiResponse::Authenticated {
                attempt,
                token: "t1".into(),
            }),
        )
        .unwrap();
        assert_eq!(state.session.token(), Some("t1"));
        assert_eq!(state.route, Route::Dashboard);
        assert!(actions.contains(&Action::SetCredential(Some("t1".into()))));
        assert!(actions.contains(&Action::PersistSession(Some("t1".into()))));
    }

    #[test]
    fn failed_login_stays_anonymous() {
        let mut state = AppState::new();
        let (_, actions) =
            handle_event(&mut state, &Event::Login(Credentials::new("a", "b"))).unwrap();
        let attempt = auth_attempt(&actions);
        let (_, actions) = handle_event(
            &mut state,
            &Event::Api(ApiResponse::AuthFailed {
                attempt,
                message: "Request failed with status code 401".into(),
            }),
        )
        .unwrap();
        assert!(!state.session.is_authenticated());
        assert_eq!(notices(&actions), ["Request failed with status code 401"]);
    }

    #[test]
    fn login_reply_after_logout_is_discarded() {
        let mut state = AppState::new();
        let (_, actions) =
            handle_event(&mut state, &Event::Login(Credentials::new("a", "b"))).unwrap();
        let attempt = auth_attempt(&actions);
        handle_event(&mut state, &Event::Logout).unwrap();

        let (redraw, actions) = handle_event(
            &mut state,
            &Event::Api(ApiResponse::Authenticated {
                attempt,
                token: "t1".into(),
            }),
        )
        .unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
        assert!(!state.session.is_authenticated());
        assert_eq!(state.route, Route::Login);
    }

    #[test]
    fn only_latest_login_attempt_counts() {
        let mut state = AppState::new();
        let (_, first) =
            handle_event(&mut state, &Event::Login(Credentials::new("a", "b"))).unwrap();
        let stale = auth_attempt(&first);
        handle_event(&mut state, &Event::Logout).unwrap();
        let (_, second) =
            handle_event(&mut state, &Event::Login(Credentials::new("c", "d"))).unwrap();
        let current = auth_attempt(&second);

        handle_event(
            &mut state,
            &Event::Api(ApiResponse::Authenticated {
                attempt: stale,
                token: "old".into(),
            }),
        )
        .unwrap();
        assert!(!state.session.is_authenticated());
        assert!(state.session.pending());

        handle_event(
            &mut state,
            &Event::Api(ApiResponse::Authenticated {
                attempt: current,
                token: "new".into(),
            }),
        )
        .unwrap();
        assert_eq!(state.session.token(), Some("new"));
    }

    #[test]
    fn logout_clears_credential_and_opens_login() {
        let mut state = signed_in();
        let (_, actions) = handle_event(&mut state, &Event::Logout).unwrap();
        assert_eq!(state.route, Route::Login);
        assert!(!state.session.is_authenticated());
        assert!(actions.contains(&Action::SetCredential(None)));
        assert!(actions.contains(&Action::PersistSession(None)));
    }

    #[test]
    fn incomplete_submit_is_blocked_with_notice() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Navigate(Route::AddMovie)).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Form(FormEvent::Submit)).unwrap();
        assert!(dispatched(&actions).is_empty());
        assert_eq!(notices(&actions), [INCOMPLETE_FORM]);
        let form = state.form.as_ref().unwrap();
        assert!(form.errors.contains(FieldPath::Producer(PersonField::Dob)));
    }

    #[test]
    fn removing_only_actor_is_refused() {
        let mut state = signed_in();
        handle_event(&mut state, &Event::Navigate(Route::AddMovie)).unwrap();
        let (redraw, actions) =
            handle_event(&mut state, &Event::Form(FormEvent::RemoveActor(0))).unwrap();
        assert!(!redraw);
        assert_eq!(notices(&actions), ["You must have at least one actor."]);
        assert_eq!(state.form.as_ref().unwrap().actors.len(), 1);
    }

    #[test]
    fn edit_with_empty_catalog_waits_for_fetch() {
        let mut state = signed_in();
        let id = MovieId::from("m2");
        let (_, actions) = handle_event(&mut state, &Event::Navigate(Route::EditMovie(id.clone()))).unwrap();
        assert_eq!(state.pending_edit.as_ref(), Some(&id));
        let ticket = fetch_ticket(&actions);

        handle_event(
            &mut state,
            &Event::Api(ApiResponse::Catalog {
                ticket,
                outcome: CatalogOutcome::Fetched(vec![movie("m1"), movie("m2")]),
            }),
        )
        .unwrap();
        let form = state.form.as_ref().unwrap();
        assert_eq!(form.mode, FormMode::Edit(id));
        assert_eq!(form.name, "Movie m2");
    }

    #[test]
    fn edit_of_unknown_movie_returns_to_dashboard() {
        let mut state = signed_in_with(&["m1"]);
        let (_, actions) =
            handle_event(&mut state, &Event::Navigate(Route::EditMovie(MovieId::from("zz")))).unwrap();
        assert_eq!(notices(&actions), [MOVIE_NOT_FOUND]);
        assert_eq!(state.route, Route::Dashboard);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = signed_in_with(&["m1", "m2"]);
        let id = MovieId::from("m1");
        let (_, actions) = handle_event(&mut state, &Event::RequestDelete(id.clone())).unwrap();
        let [Action::Confirm(confirmation)] = &actions[..] else {
            panic!("expected a confirmation, got {actions:?}");
        };
        assert_eq!(confirmation.prompt(), "Are you sure you want to delete this movie?");

        let (_, actions) = handle_event(&mut state, &confirmation.clone().confirmed_event()).unwrap();
        let ticket = match dispatched(&actions).as_slice() {
            [ApiRequest::DeleteMovie { ticket, .. }] => ticket.clone(),
            _ => panic!("expected a delete"),
        };
        handle_event(
            &mut state,
            &Event::Api(ApiResponse::Catalog {
                ticket,
                outcome: CatalogOutcome::Deleted(id),
            }),
        )
        .unwrap();
        assert_eq!(state.catalog.movies().len(), 1);
    }

    #[test]
    fn confirmed_delete_while_signed_out_is_refused() {
        let mut state = signed_in_with(&["m1"]);
        handle_event(&mut state, &Event::Logout).unwrap();
        let (redraw, actions) =
            handle_event(&mut state, &Event::DeleteConfirmed(MovieId::from("m1"))).unwrap();
        assert!(!redraw);
        assert!(dispatched(&actions).is_empty());
        assert_eq!(notices(&actions), [SIGNED_OUT]);
        assert_eq!(state.catalog.movies().len(), 1);
    }

    #[test]
    fn successful_update_returns_to_dashboard() {
        let mut state = signed_in_with(&["m1"]);
        let id = MovieId::from("m1");
        handle_event(&mut state, &Event::Navigate(Route::EditMovie(id.clone()))).unwrap();
        handle_event(
            &mut state,
            &Event::Form(FormEvent::SetField {
                path: FieldPath::Movie(MovieField::Name),
                value: "Renamed".into(),
            }),
        )
        .unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Form(FormEvent::Submit)).unwrap();
        let ticket = match dispatched(&actions).as_slice() {
            [ApiRequest::UpdateMovie { ticket, submission, .. }] => {
                assert_eq!(submission.name, "Renamed");
                assert!(submission.poster.is_none());
                ticket.clone()
            }
            _ => panic!("expected an update, got {actions:?}"),
        };

        let mut updated = movie("m1");
        updated.name = "Renamed".into();
        handle_event(
            &mut state,
            &Event::Api(ApiResponse::Catalog {
                ticket,
                outcome: CatalogOutcome::Updated(updated),
            }),
        )
        .unwrap();
        assert_eq!(state.route, Route::Dashboard);
        assert_eq!(state.catalog.movies()[0].name, "Renamed");
    }

    #[test]
    fn select_out_of_range_is_a_notice() {
        let mut state = signed_in_with(&["m1"]);
        let (_, actions) = handle_event(&mut state, &Event::SelectMovie(3)).unwrap();
        assert_eq!(notices(&actions), ["There is no movie #3."]);
        handle_event(&mut state, &Event::SelectMovie(1)).unwrap();
        assert_eq!(state.featured, 0);
    }
}
