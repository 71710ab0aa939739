//! Typed addresses for movie form fields.
//!
//! A [`FieldPath`] names one input of the movie form: a top-level movie field,
//! a producer field, or a field of the actor at a given position. Paths order
//! movie fields first, then producer, then actors by index, which is also the
//! order errors are listed in.

use std::fmt;

/// Top-level movie inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MovieField {
    Name,
    YearOfRelease,
    Plot,
    Poster,
}

/// Inputs shared by the producer and every actor entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PersonField {
    Name,
    Gender,
    Dob,
    Bio,
}

impl PersonField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Gender, Self::Dob, Self::Bio];

    const fn key(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Gender => "Gender",
            Self::Dob => "Dob",
            Self::Bio => "Bio",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Dob => "DOB",
            Self::Bio => "bio",
        }
    }

    fn parse(input: &str) -> Option<Self> {
        match input {
            "name" => Some(Self::Name),
            "gender" => Some(Self::Gender),
            "dob" => Some(Self::Dob),
            "bio" => Some(Self::Bio),
            _ => None,
        }
    }
}

/// Address of a single movie form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Movie(MovieField),
    Producer(PersonField),
    Actor { index: usize, field: PersonField },
}

impl FieldPath {
    #[must_use]
    pub const fn actor(index: usize, field: PersonField) -> Self {
        Self::Actor { index, field }
    }

    /// Parses the dotted notation used on the command line.
    ///
    /// Accepted forms: `name`, `year` (or `year_of_release`), `plot`, `poster`,
    /// `producer.<field>` and `actor.<index>.<field>` where `<field>` is one of
    /// `name`, `gender`, `dob`, `bio`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cinedex::form::{FieldPath, PersonField};
    ///
    /// assert_eq!(
    ///     FieldPath::parse("actor.2.dob"),
    ///     Some(FieldPath::actor(2, PersonField::Dob))
    /// );
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let lowered = input.trim().to_ascii_lowercase();
        let parts: Vec<&str> = lowered.split('.').collect();
        match parts.as_slice() {
            ["name"] => Some(Self::Movie(MovieField::Name)),
            ["year" | "year_of_release"] => Some(Self::Movie(MovieField::YearOfRelease)),
            ["plot"] => Some(Self::Movie(MovieField::Plot)),
            ["poster"] => Some(Self::Movie(MovieField::Poster)),
            ["producer", field] => PersonField::parse(field).map(Self::Producer),
            ["actor", index, field] => {
                let index = index.parse().ok()?;
                PersonField::parse(field).map(|field| Self::Actor { index, field })
            }
            _ => None,
        }
    }

    /// Dotted notation accepted by [`FieldPath::parse`].
    #[must_use]
    pub fn command_key(self) -> String {
        match self {
            Self::Movie(MovieField::Name) => "name".to_string(),
            Self::Movie(MovieField::YearOfRelease) => "year".to_string(),
            Self::Movie(MovieField::Plot) => "plot".to_string(),
            Self::Movie(MovieField::Poster) => "poster".to_string(),
            Self::Producer(field) => format!("producer.{}", field.label().to_ascii_lowercase()),
            Self::Actor { index, field } => {
                format!("actor.{index}.{}", field.label().to_ascii_lowercase())
            }
        }
    }

    /// Message shown when the field is left empty.
    #[must_use]
    pub fn required_message(self) -> String {
        match self {
            Self::Movie(MovieField::Name) => "Movie name is required".to_string(),
            Self::Movie(MovieField::YearOfRelease) => "Year of release is required".to_string(),
            Self::Movie(MovieField::Plot) => "Plot is required".to_string(),
            Self::Movie(MovieField::Poster) => "Poster is required".to_string(),
            Self::Producer(field) => format!("Producer {} is required", field.label()),
            Self::Actor { field, .. } => format!("Actor {} is required", field.label()),
        }
    }

    /// Prefix used in messages about malformed input ("Producer DOB", "Actor gender").
    #[must_use]
    pub fn subject(self) -> String {
        match self {
            Self::Movie(MovieField::Name) => "Movie name".to_string(),
            Self::Movie(MovieField::YearOfRelease) => "Year of release".to_string(),
            Self::Movie(MovieField::Plot) => "Plot".to_string(),
            Self::Movie(MovieField::Poster) => "Poster".to_string(),
            Self::Producer(field) => format!("Producer {}", field.label()),
            Self::Actor { field, .. } => format!("Actor {}", field.label()),
        }
    }
}

/// Flat key such as `name`, `producerDob` or `actorName1`, used for display.
impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie(MovieField::Name) => f.write_str("name"),
            Self::Movie(MovieField::YearOfRelease) => f.write_str("year_of_release"),
            Self::Movie(MovieField::Plot) => f.write_str("plot"),
            Self::Movie(MovieField::Poster) => f.write_str("poster"),
            Self::Producer(field) => write!(f, "producer{}", field.key()),
            Self::Actor { index, field } => write!(f, "actor{}{index}", field.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_paths() {
        assert_eq!(FieldPath::parse("name"), Some(FieldPath::Movie(MovieField::Name)));
        assert_eq!(
            FieldPath::parse("Year"),
            Some(FieldPath::Movie(MovieField::YearOfRelease))
        );
        assert_eq!(
            FieldPath::parse("producer.bio"),
            Some(FieldPath::Producer(PersonField::Bio))
        );
        assert_eq!(
            FieldPath::parse("actor.10.gender"),
            Some(FieldPath::actor(10, PersonField::Gender))
        );
        assert_eq!(FieldPath::parse("actor.x.name"), None);
        assert_eq!(FieldPath::parse("producer.age"), None);
    }

    #[test]
    fn command_keys_parse_back() {
        for path in [
            FieldPath::Movie(MovieField::YearOfRelease),
            FieldPath::Producer(PersonField::Dob),
            FieldPath::actor(4, PersonField::Gender),
        ] {
            assert_eq!(FieldPath::parse(&path.command_key()), Some(path));
        }
    }

    #[test]
    fn display_keys_match_flat_form_keys() {
        assert_eq!(FieldPath::Producer(PersonField::Dob).to_string(), "producerDob");
        assert_eq!(FieldPath::actor(1, PersonField::Name).to_string(), "actorName1");
        assert_eq!(FieldPath::actor(10, PersonField::Name).to_string(), "actorName10");
    }

    #[test]
    fn ordering_groups_actors_by_index() {
        let mut paths = vec![
            FieldPath::actor(1, PersonField::Name),
            FieldPath::Producer(PersonField::Bio),
            FieldPath::actor(0, PersonField::Bio),
            FieldPath::Movie(MovieField::Plot),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                FieldPath::Movie(MovieField::Plot),
                FieldPath::Producer(PersonField::Bio),
                FieldPath::actor(0, PersonField::Bio),
                FieldPath::actor(1, PersonField::Name),
            ]
        );
    }

    #[test]
    fn required_messages() {
        assert_eq!(
            FieldPath::Producer(PersonField::Dob).required_message(),
            "Producer DOB is required"
        );
        assert_eq!(
            FieldPath::actor(3, PersonField::Gender).required_message(),
            "Actor gender is required"
        );
    }
}
