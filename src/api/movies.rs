//! Movie endpoints.

use super::client::{ApiClient, RequestBody};
use crate::domain::{Movie, MovieId, MovieList, Result};
use crate::form::MovieSubmission;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

impl ApiClient {
    /// `GET /movies`, in server order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request fails.
    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        let list: MovieList = self.request(Method::GET, "/movies", RequestBody::Empty).await?;
        Ok(list.movies)
    }

    /// `POST /movies` with a multipart body. Returns the created record.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request fails.
    pub async fn create_movie(&self, submission: &MovieSubmission) -> Result<Movie> {
        let form = multipart_form(submission)?;
        self.request(Method::POST, "/movies", RequestBody::Multipart(form))
            .await
    }

    /// `PUT /movies/:id`. The poster part is only sent when a new file was chosen.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request fails.
    pub async fn update_movie(&self, id: &MovieId, submission: &MovieSubmission) -> Result<Movie> {
        let form = multipart_form(submission)?;
        self.request(
            Method::PUT,
            &format!("/movies/{id}"),
            RequestBody::Multipart(form),
        )
        .await
    }

    /// `DELETE /movies/:id`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request fails.
    pub async fn delete_movie(&self, id: &MovieId) -> Result<()> {
        self.execute(Method::DELETE, &format!("/movies/{id}"), RequestBody::Empty)
            .await
    }
}

/// Encodes a submission the way the backend expects it: plain text fields,
/// the poster as a file part, producer and actors as JSON strings with
/// calendar-date birthdays.
///
/// # Errors
///
/// Fails when the people cannot be serialized or the poster has an invalid
/// content type.
pub fn multipart_form(submission: &MovieSubmission) -> Result<Form> {
    let producer = serde_json::to_string(&submission.producer)?;
    let actors = serde_json::to_string(&submission.actors)?;

    let mut form = Form::new()
        .text("name", submission.name.clone())
        .text("year_of_release", submission.year_of_release.to_string())
        .text("plot", submission.plot.clone())
        .text("producer", producer)
        .text("actors", actors);

    if let Some(poster) = &submission.poster {
        let part = Part::bytes(poster.bytes.clone())
            .file_name(poster.file_name.clone())
            .mime_str(&poster.content_type)?;
        form = form.part("poster", part);
    }
    Ok(form)
}
