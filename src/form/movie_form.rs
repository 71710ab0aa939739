//! Editable movie form with live, field-level validation.
//!
//! The form holds raw, possibly incomplete input. Setting a field re-validates
//! it immediately (for actors, the whole actor entry is re-validated) so the
//! view can show errors while typing. [`MovieForm::validate`] runs the full
//! check before submission and, when nothing is missing, produces a
//! [`MovieSubmission`] ready to be encoded for the backend.

use super::fields::{FieldPath, MovieField, PersonField};
use super::validation::ValidationErrors;
use crate::domain::movie::calendar_date;
use crate::domain::{Gender, Movie, MovieId, Person};
use chrono::NaiveDate;
use std::fmt;
use std::path::Path;

/// Whether the form creates a new movie or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(MovieId),
}

/// Whether a poster file must accompany the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterRule {
    /// New movies need a poster.
    Required,
    /// Edits keep the stored poster unless a new file is supplied.
    Optional,
}

impl FormMode {
    #[must_use]
    pub const fn poster_rule(&self) -> PosterRule {
        match self {
            Self::Create => PosterRule::Required,
            Self::Edit(_) => PosterRule::Optional,
        }
    }
}

/// A poster image picked by the user, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct PosterUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PosterUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Reads a poster image from disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub async fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("poster")
            .to_string();
        tracing::debug!(file_name = %file_name, size = bytes.len(), "poster loaded");
        Ok(Self::new(file_name, bytes))
    }
}

impl fmt::Debug for PosterUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosterUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Raw input for a producer or an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonForm {
    pub name: String,
    pub gender: Option<Gender>,
    pub dob: Option<NaiveDate>,
    pub bio: String,
}

impl PersonForm {
    fn from_person(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            gender: Some(person.gender),
            dob: Some(person.dob),
            bio: person.bio.clone(),
        }
    }

    fn is_missing(&self, field: PersonField) -> bool {
        match field {
            PersonField::Name => self.name.trim().is_empty(),
            PersonField::Gender => self.gender.is_none(),
            PersonField::Dob => self.dob.is_none(),
            PersonField::Bio => self.bio.trim().is_empty(),
        }
    }

    /// Stores raw input for `field`. Returns a message when the input could not be parsed.
    fn set_raw(&mut self, field: PersonField, raw: &str, subject: &str) -> Option<String> {
        match field {
            PersonField::Name => {
                self.name = raw.to_string();
                None
            }
            PersonField::Bio => {
                self.bio = raw.to_string();
                None
            }
            PersonField::Gender => {
                self.gender = Gender::parse(raw);
                (self.gender.is_none() && !raw.trim().is_empty())
                    .then(|| format!("{subject} must be F, M or O"))
            }
            PersonField::Dob => {
                if raw.trim().is_empty() {
                    self.dob = None;
                    return None;
                }
                match calendar_date::parse(raw) {
                    Ok(date) => {
                        self.dob = Some(date);
                        None
                    }
                    Err(_) => {
                        self.dob = None;
                        Some(format!("{subject} must be a date (YYYY-MM-DD)"))
                    }
                }
            }
        }
    }

    fn to_person(&self) -> Option<Person> {
        let (Some(gender), Some(dob)) = (self.gender, self.dob) else {
            return None;
        };
        if self.name.trim().is_empty() || self.bio.trim().is_empty() {
            return None;
        }
        Some(Person {
            name: self.name.trim().to_string(),
            gender,
            dob,
            bio: self.bio.trim().to_string(),
        })
    }
}

/// User-facing notices raised by form edits that are refused outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormNotice {
    /// The last remaining actor entry cannot be removed.
    LastActor,
    /// No actor entry exists at the given position.
    NoSuchActor(usize),
    /// Posters are chosen from a file, not typed in.
    PosterNeedsFile,
}

impl fmt::Display for FormNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastActor => f.write_str("You must have at least one actor."),
            Self::NoSuchActor(index) => write!(f, "There is no actor #{index}."),
            Self::PosterNeedsFile => f.write_str("Choose a poster image file instead."),
        }
    }
}

/// A complete, validated movie ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSubmission {
    pub name: String,
    pub year_of_release: i32,
    pub plot: String,
    pub poster: Option<PosterUpload>,
    pub producer: Person,
    pub actors: Vec<Person>,
}

/// Editable state of the add/edit movie screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieForm {
    pub mode: FormMode,
    pub name: String,
    pub year_of_release: Option<i32>,
    pub plot: String,
    /// Newly chosen poster file, if any.
    pub poster: Option<PosterUpload>,
    /// URL of the poster already stored for the movie being edited.
    pub current_poster: Option<String>,
    pub producer: PersonForm,
    pub actors: Vec<PersonForm>,
    /// Live validation messages, updated as fields change.
    pub errors: ValidationErrors,
}

impl MovieForm {
    /// Blank form with a single empty actor entry.
    #[must_use]
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            name: String::new(),
            year_of_release: None,
            plot: String::new(),
            poster: None,
            current_poster: None,
            producer: PersonForm::default(),
            actors: vec![PersonForm::default()],
            errors: ValidationErrors::new(),
        }
    }

    /// Form pre-filled from a loaded movie, in edit mode.
    #[must_use]
    pub fn from_movie(movie: &Movie) -> Self {
        let actors = if movie.actors.is_empty() {
            vec![PersonForm::default()]
        } else {
            movie.actors.iter().map(PersonForm::from_person).collect()
        };
        Self {
            mode: FormMode::Edit(movie.id.clone()),
            name: movie.name.clone(),
            year_of_release: Some(movie.year_of_release),
            plot: movie.plot.clone(),
            poster: None,
            current_poster: (!movie.poster.is_empty()).then(|| movie.poster.clone()),
            producer: movie
                .producer
                .as_ref()
                .map(PersonForm::from_person)
                .unwrap_or_default(),
            actors,
            errors: ValidationErrors::new(),
        }
    }

    /// Sets a text input and re-validates it.
    ///
    /// Setting any actor field re-validates all four fields of that actor.
    ///
    /// # Errors
    ///
    /// Returns a [`FormNotice`] when the actor index does not exist or when
    /// the poster is addressed as text.
    pub fn set_text(&mut self, path: FieldPath, raw: &str) -> Result<(), FormNotice> {
        let parse_error = match path {
            FieldPath::Movie(MovieField::Name) => {
                self.name = raw.to_string();
                None
            }
            FieldPath::Movie(MovieField::Plot) => {
                self.plot = raw.to_string();
                None
            }
            FieldPath::Movie(MovieField::YearOfRelease) => {
                let trimmed = raw.trim();
                self.year_of_release = trimmed.parse().ok();
                (self.year_of_release.is_none() && !trimmed.is_empty())
                    .then(|| format!("{} must be a number", path.subject()))
            }
            FieldPath::Movie(MovieField::Poster) => return Err(FormNotice::PosterNeedsFile),
            FieldPath::Producer(field) => self.producer.set_raw(field, raw, &path.subject()),
            FieldPath::Actor { index, field } => {
                let subject = path.subject();
                let actor = self
                    .actors
                    .get_mut(index)
                    .ok_or(FormNotice::NoSuchActor(index))?;
                actor.set_raw(field, raw, &subject)
            }
        };

        if let FieldPath::Actor { index, .. } = path {
            for field in PersonField::ALL {
                let sibling = FieldPath::actor(index, field);
                self.errors.set(sibling, self.check(sibling, self.mode.poster_rule()));
            }
        } else {
            self.errors.set(path, self.check(path, self.mode.poster_rule()));
        }

        if let Some(message) = parse_error {
            self.errors.insert(path, message);
        }
        Ok(())
    }

    /// Replaces (or clears) the chosen poster file and re-validates it.
    pub fn set_poster(&mut self, poster: Option<PosterUpload>) {
        self.poster = poster;
        let path = FieldPath::Movie(MovieField::Poster);
        self.errors.set(path, self.check(path, self.mode.poster_rule()));
    }

    /// Appends an empty actor entry.
    pub fn add_actor(&mut self) {
        self.actors.push(PersonForm::default());
    }

    /// Removes the actor at `index`, keeping the remaining errors attached to
    /// the right entries.
    ///
    /// # Errors
    ///
    /// Refuses to remove the only actor, and reports unknown positions.
    pub fn remove_actor(&mut self, index: usize) -> Result<(), FormNotice> {
        if index >= self.actors.len() {
            return Err(FormNotice::NoSuchActor(index));
        }
        if self.actors.len() == 1 {
            return Err(FormNotice::LastActor);
        }
        self.actors.remove(index);
        self.errors.remove_actor(index);
        Ok(())
    }

    /// Validates every field without touching the live errors.
    ///
    /// # Errors
    ///
    /// Returns every missing or malformed field when the form is incomplete.
    pub fn validate(&self, rule: PosterRule) -> Result<MovieSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for path in self.all_paths() {
            if let Some(message) = self.check(path, rule) {
                errors.insert(path, message);
            }
        }

        let producer = self.producer.to_person();
        let actors: Option<Vec<Person>> = self.actors.iter().map(PersonForm::to_person).collect();

        match (errors.is_empty(), self.year_of_release, producer, actors) {
            (true, Some(year_of_release), Some(producer), Some(actors)) => Ok(MovieSubmission {
                name: self.name.trim().to_string(),
                year_of_release,
                plot: self.plot.trim().to_string(),
                poster: self.poster.clone(),
                producer,
                actors,
            }),
            _ => Err(errors),
        }
    }

    /// Runs [`validate`](Self::validate) and stores the outcome as the live errors.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn submit(&mut self) -> Result<MovieSubmission, ValidationErrors> {
        let outcome = self.validate(self.mode.poster_rule());
        match &outcome {
            Ok(_) => self.errors.clear(),
            Err(errors) => self.errors = errors.clone(),
        }
        outcome
    }

    fn all_paths(&self) -> Vec<FieldPath> {
        let mut paths = vec![
            FieldPath::Movie(MovieField::Name),
            FieldPath::Movie(MovieField::YearOfRelease),
            FieldPath::Movie(MovieField::Plot),
            FieldPath::Movie(MovieField::Poster),
        ];
        paths.extend(PersonField::ALL.map(FieldPath::Producer));
        for index in 0..self.actors.len() {
            paths.extend(PersonField::ALL.map(|field| FieldPath::actor(index, field)));
        }
        paths
    }

    fn check(&self, path: FieldPath, rule: PosterRule) -> Option<String> {
        let missing = match path {
            FieldPath::Movie(MovieField::Name) => self.name.trim().is_empty(),
            FieldPath::Movie(MovieField::YearOfRelease) => self.year_of_release.is_none(),
            FieldPath::Movie(MovieField::Plot) => self.plot.trim().is_empty(),
            FieldPath::Movie(MovieField::Poster) => {
                rule == PosterRule::Required && self.poster.is_none()
            }
            FieldPath::Producer(field) => self.producer.is_missing(field),
            FieldPath::Actor { index, field } => self
                .actors
                .get(index)
                .map_or(false, |actor| actor.is_missing(field)),
        };
        missing.then(|| path.required_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form(mode: FormMode) -> MovieForm {
        let mut form = MovieForm::new(mode);
        form.set_text(FieldPath::Movie(MovieField::Name), "Arrival").unwrap();
        form.set_text(FieldPath::Movie(MovieField::YearOfRelease), "2016").unwrap();
        form.set_text(FieldPath::Movie(MovieField::Plot), "Linguist meets heptapods").unwrap();
        form.set_poster(Some(PosterUpload::new("arrival.png", vec![1, 2, 3])));
        for (field, value) in [
            (PersonField::Name, "Shawn Levy"),
            (PersonField::Gender, "M"),
            (PersonField::Dob, "1968-07-23"),
            (PersonField::Bio, "Producer"),
        ] {
            form.set_text(FieldPath::Producer(field), value).unwrap();
        }
        for (field, value) in [
            (PersonField::Name, "Amy Adams"),
            (PersonField::Gender, "F"),
            (PersonField::Dob, "1974-08-20"),
            (PersonField::Bio, "Actor"),
        ] {
            form.set_text(FieldPath::actor(0, field), value).unwrap();
        }
        form
    }

    #[test]
    fn complete_form_produces_submission() {
        let form = filled_form(FormMode::Create);
        let submission = form.validate(PosterRule::Required).unwrap();
        assert_eq!(submission.name, "Arrival");
        assert_eq!(submission.year_of_release, 2016);
        assert_eq!(submission.actors.len(), 1);
        assert_eq!(submission.producer.gender, Gender::Male);
        assert!(submission.poster.is_some());
    }

    #[test]
    fn unset_producer_dob_blocks_submission() {
        let mut form = filled_form(FormMode::Create);
        form.set_text(FieldPath::Producer(PersonField::Dob), "").unwrap();

        let errors = form.validate(PosterRule::Required).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FieldPath::Producer(PersonField::Dob)),
            Some("Producer DOB is required")
        );
    }

    #[test]
    fn poster_is_optional_when_editing() {
        let mut form = filled_form(FormMode::Edit(MovieId::from("m1")));
        form.set_poster(None);
        assert!(form.errors.is_empty());
        assert!(form.validate(PosterRule::Optional).is_ok());
        assert!(form.validate(PosterRule::Required).is_err());
    }

    #[test]
    fn every_actor_is_validated_by_position() {
        let mut form = filled_form(FormMode::Create);
        form.add_actor();
        let errors = form.validate(PosterRule::Required).unwrap_err();
        assert_eq!(errors.len(), 4);
        for field in PersonField::ALL {
            assert!(errors.contains(FieldPath::actor(1, field)));
        }
    }

    #[test]
    fn editing_an_actor_revalidates_the_whole_entry() {
        let mut form = MovieForm::new(FormMode::Create);
        form.set_text(FieldPath::actor(0, PersonField::Name), "Someone").unwrap();
        assert!(!form.errors.contains(FieldPath::actor(0, PersonField::Name)));
        assert_eq!(
            form.errors.get(FieldPath::actor(0, PersonField::Bio)),
            Some("Actor bio is required")
        );
        assert!(form.errors.contains(FieldPath::actor(0, PersonField::Gender)));
    }

    #[test]
    fn malformed_input_keeps_its_own_message() {
        let mut form = MovieForm::new(FormMode::Create);
        form.set_text(FieldPath::Movie(MovieField::YearOfRelease), "nineteen").unwrap();
        assert_eq!(
            form.errors.get(FieldPath::Movie(MovieField::YearOfRelease)),
            Some("Year of release must be a number")
        );
        form.set_text(FieldPath::actor(0, PersonField::Dob), "31/12/1990").unwrap();
        assert_eq!(
            form.errors.get(FieldPath::actor(0, PersonField::Dob)),
            Some("Actor DOB must be a date (YYYY-MM-DD)")
        );
    }

    #[test]
    fn sole_actor_cannot_be_removed() {
        let mut form = MovieForm::new(FormMode::Create);
        assert_eq!(form.remove_actor(0), Err(FormNotice::LastActor));
        assert_eq!(form.actors.len(), 1);
        assert_eq!(form.remove_actor(3), Err(FormNotice::NoSuchActor(3)));
    }

    #[test]
    fn removing_an_actor_shifts_its_successors_errors() {
        let mut form = filled_form(FormMode::Create);
        form.add_actor();
        form.add_actor();
        form.set_text(FieldPath::actor(2, PersonField::Name), "Jeremy Renner").unwrap();
        form.submit().unwrap_err();
        assert!(form.errors.contains(FieldPath::actor(1, PersonField::Name)));
        assert!(!form.errors.contains(FieldPath::actor(2, PersonField::Name)));

        form.remove_actor(1).unwrap();

        assert_eq!(form.actors.len(), 2);
        assert_eq!(form.actors[1].name, "Jeremy Renner");
        assert!(!form.errors.contains(FieldPath::actor(1, PersonField::Name)));
        assert!(form.errors.contains(FieldPath::actor(1, PersonField::Bio)));
        assert!(!form.errors.iter().any(|(path, _)| matches!(path, FieldPath::Actor { index: 2, .. })));
    }

    #[test]
    fn from_movie_prefills_edit_mode() {
        let movie: Movie = serde_json::from_value(serde_json::json!({
            "_id": "m9",
            "name": "Dune",
            "year_of_release": 2021,
            "plot": "Spice",
            "poster": "http://cdn/dune.jpg",
            "producer_id": {"name": "Mary Parent", "gender": "F", "dob": "1968-01-01", "bio": "Producer"},
            "actors": []
        }))
        .unwrap();

        let form = MovieForm::from_movie(&movie);
        assert_eq!(form.mode, FormMode::Edit(MovieId::from("m9")));
        assert_eq!(form.current_poster.as_deref(), Some("http://cdn/dune.jpg"));
        assert_eq!(form.actors, vec![PersonForm::default()]);
        assert_eq!(form.producer.gender, Some(Gender::Female));
    }

    #[test]
    fn poster_content_type_from_extension() {
        assert_eq!(PosterUpload::new("a.JPG", vec![]).content_type, "image/jpeg");
        assert_eq!(PosterUpload::new("b.webp", vec![]).content_type, "image/webp");
        assert_eq!(PosterUpload::new("c", vec![]).content_type, "application/octet-stream");
    }
}
