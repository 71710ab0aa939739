//! The movie collection and its four operations.
//!
//! Every operation is split in two pure steps, [`CatalogStore::begin`] and
//! [`CatalogStore::apply`], so the interactive runtime can run the network
//! call on the worker and fold the response back in later. The async
//! wrappers ([`fetch_all`](CatalogStore::fetch_all), [`create`](CatalogStore::create),
//! [`update`](CatalogStore::update), [`remove`](CatalogStore::remove)) chain
//! both steps around an [`ApiClient`] call for direct use.
//!
//! Update and delete responses are checked against the last sequence number
//! applied to their movie; an older response is dropped instead of
//! overwriting newer data.

use super::status::{OpKind, OpState, Ticket};
use crate::api::ApiClient;
use crate::domain::{CinedexError, Movie, MovieId, Result};
use crate::form::{MovieForm, MovieSubmission, PosterRule};
use std::collections::HashMap;

/// Result of a catalog request, as handed back to [`CatalogStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOutcome {
    Fetched(Vec<Movie>),
    Created(Movie),
    Updated(Movie),
    Deleted(MovieId),
    Failed(String),
}

/// What [`CatalogStore::apply`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The outcome changed the collection or recorded an error.
    Accepted,
    /// A newer update or delete for the same movie was already applied.
    Stale,
    /// The ticket does not match the in-flight operation of its kind.
    Unknown,
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    movies: Vec<Movie>,
    error: Option<String>,
    ops: HashMap<OpKind, OpState>,
    in_flight: HashMap<OpKind, u64>,
    next_seq: u64,
    applied: HashMap<MovieId, u64>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Movies in server order.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Last operation failure, cleared when a fetch starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn state(&self, kind: OpKind) -> &OpState {
        static IDLE: OpState = OpState::Idle;
        self.ops.get(&kind).unwrap_or(&IDLE)
    }

    /// `true` while any operation is pending.
    #[must_use]
    pub fn loading(&self) -> bool {
        OpKind::ALL.iter().any(|kind| self.state(*kind).is_pending())
    }

    /// # Errors
    ///
    /// Returns [`CinedexError::NotFound`] when no loaded movie has this id.
    pub fn find(&self, id: &MovieId) -> Result<&Movie> {
        self.movies
            .iter()
            .find(|movie| &movie.id == id)
            .ok_or_else(|| CinedexError::NotFound(id.clone()))
    }

    /// Marks `kind` as pending and issues its ticket.
    ///
    /// Starting a fetch also clears the store error.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Busy`] when an operation of the same kind is
    /// already pending.
    pub fn begin(&mut self, kind: OpKind, target: Option<MovieId>) -> Result<Ticket> {
        if self.state(kind).is_pending() {
            return Err(CinedexError::Busy(kind));
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        self.ops.insert(kind, OpState::Pending);
        self.in_flight.insert(kind, seq);
        if kind == OpKind::Fetch {
            self.error = None;
        }
        tracing::debug!(%kind, seq, target = ?target, "catalog operation started");
        Ok(Ticket { kind, seq, target })
    }

    /// Folds the outcome of the operation identified by `ticket` into the store.
    pub fn apply(&mut self, ticket: &Ticket, outcome: CatalogOutcome) -> Applied {
        if self.in_flight.get(&ticket.kind) != Some(&ticket.seq) {
            tracing::debug!(kind = %ticket.kind, seq = ticket.seq, "ignoring outcome for unknown ticket");
            return Applied::Unknown;
        }
        self.in_flight.remove(&ticket.kind);

        if let CatalogOutcome::Failed(message) = outcome {
            tracing::warn!(kind = %ticket.kind, error = %message, "catalog operation failed");
            self.error = Some(message.clone());
            self.ops.insert(ticket.kind, OpState::Rejected(message));
            return Applied::Accepted;
        }
        self.ops.insert(ticket.kind, OpState::Fulfilled);

        if let Some(target) = &ticket.target {
            let last = self.applied.get(target).copied().unwrap_or(0);
            if ticket.seq < last {
                tracing::debug!(kind = %ticket.kind, seq = ticket.seq, last, "dropping stale response");
                return Applied::Stale;
            }
            self.applied.insert(target.clone(), ticket.seq);
        }

        match outcome {
            CatalogOutcome::Fetched(movies) => {
                tracing::debug!(count = movies.len(), "catalog replaced");
                self.movies = movies;
            }
            CatalogOutcome::Created(movie) => self.movies.push(movie),
            CatalogOutcome::Updated(movie) => {
                let id = ticket.target.as_ref().unwrap_or(&movie.id);
                if let Some(slot) = self.movies.iter_mut().find(|m| &m.id == id) {
                    *slot = movie;
                }
            }
            CatalogOutcome::Deleted(id) => self.movies.retain(|m| m.id != id),
            CatalogOutcome::Failed(_) => {}
        }
        Applied::Accepted
    }

    fn settle<T>(
        &mut self,
        ticket: &Ticket,
        result: Result<T>,
        outcome: impl FnOnce(&T) -> CatalogOutcome,
    ) -> Result<T> {
        match result {
            Ok(value) => {
                self.apply(ticket, outcome(&value));
                Ok(value)
            }
            Err(e) => {
                self.apply(ticket, CatalogOutcome::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Loads the whole catalog, replacing the collection on success.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Busy`] or the transport error that was recorded.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn fetch_all(&mut self, api: &ApiClient) -> Result<()> {
        let ticket = self.begin(OpKind::Fetch, None)?;
        let result = api.list_movies().await;
        self.settle(&ticket, result, |movies| CatalogOutcome::Fetched(movies.clone()))?;
        Ok(())
    }

    /// Validates `form` (poster required) and posts it, appending the created movie.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Validation`] without any request when a field
    /// is missing, otherwise [`CinedexError::Busy`] or the transport error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn create(&mut self, api: &ApiClient, form: &MovieForm) -> Result<Movie> {
        let submission = form
            .validate(PosterRule::Required)
            .map_err(CinedexError::Validation)?;
        self.create_submission(api, &submission).await
    }

    /// Posts an already validated submission.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Busy`] or the transport error.
    pub async fn create_submission(
        &mut self,
        api: &ApiClient,
        submission: &MovieSubmission,
    ) -> Result<Movie> {
        let ticket = self.begin(OpKind::Create, None)?;
        let result = api.create_movie(submission).await;
        self.settle(&ticket, result, |movie| CatalogOutcome::Created(movie.clone()))
    }

    /// Validates `form` (poster optional) and replaces movie `id` in place.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    #[tracing::instrument(level = "debug", skip(self, api, form), fields(id = %id))]
    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: &MovieId,
        form: &MovieForm,
    ) -> Result<Movie> {
        let submission = form
            .validate(PosterRule::Optional)
            .map_err(CinedexError::Validation)?;
        let ticket = self.begin(OpKind::Update, Some(id.clone()))?;
        let result = api.update_movie(id, &submission).await;
        self.settle(&ticket, result, |movie| CatalogOutcome::Updated(movie.clone()))
    }

    /// Deletes movie `id`. Confirmation is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Busy`] or the transport error.
    #[tracing::instrument(level = "debug", skip(self, api), fields(id = %id))]
    pub async fn remove(&mut self, api: &ApiClient, id: &MovieId) -> Result<()> {
        let ticket = self.begin(OpKind::Delete, Some(id.clone()))?;
        let result = api.delete_movie(id).await;
        self.settle(&ticket, result, |_| CatalogOutcome::Deleted(id.clone()))
    }
}
