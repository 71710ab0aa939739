//! Movie and person records as exchanged with the REST backend.
//!
//! The wire shape is fixed by the server: movies carry their identifier in
//! `_id` and their producer in `producer_id`, people carry a single-letter
//! gender code and a calendar date of birth.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, server-assigned movie identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Gender of a producer or actor.
///
/// Serialized as the single-letter codes the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Parses user input: the wire code (`F`, `M`, `O`) or the full word, case-insensitively.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "f" | "female" => Some(Self::Female),
            "m" | "male" => Some(Self::Male),
            "o" | "other" => Some(Self::Other),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Female => "F",
            Self::Male => "M",
            Self::Other => "O",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// A producer or actor embedded in a movie record.
///
/// People have no identity of their own; they live and die with their movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub gender: Gender,
    #[serde(with = "calendar_date")]
    pub dob: NaiveDate,
    pub bio: String,
}

/// A movie record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: MovieId,
    pub name: String,
    pub year_of_release: i32,
    #[serde(default)]
    pub plot: String,
    /// Poster URL served by the backend.
    #[serde(default)]
    pub poster: String,
    /// Older records may have lost their producer; the listing shows "N/A" for those.
    #[serde(rename = "producer_id", default)]
    pub producer: Option<Person>,
    #[serde(default)]
    pub actors: Vec<Person>,
}

impl Movie {
    /// Producer name for listings, `"N/A"` when the record has none.
    #[must_use]
    pub fn producer_name(&self) -> &str {
        self.producer.as_ref().map_or("N/A", |p| p.name.as_str())
    }

    /// Actor names joined with `", "` in cast order.
    #[must_use]
    pub fn actor_names(&self) -> String {
        self.actors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Envelope of `GET /movies`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieList {
    #[serde(default)]
    pub movies: Vec<Movie>,
}

/// Serde adapter for calendar dates.
///
/// Always writes `YYYY-MM-DD`. Reads either that or a full timestamp such as
/// `1990-01-01T00:00:00.000Z`, keeping only the date part.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parses a date, ignoring anything after the `YYYY-MM-DD` prefix.
    ///
    /// # Errors
    ///
    /// Returns a message when the prefix is not a valid calendar date.
    pub fn parse(raw: &str) -> Result<NaiveDate, String> {
        let trimmed = raw.trim();
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, FORMAT)
            .map_err(|e| format!("invalid date {trimmed:?}: {e}"))
    }
}
