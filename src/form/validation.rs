//! Field-scoped validation results.

use super::fields::FieldPath;
use std::collections::BTreeMap;

/// Validation messages keyed by the field they belong to.
///
/// Actor entries are addressed by position, so removing an actor must go
/// through [`ValidationErrors::remove_actor`] to keep later entries attached
/// to the right person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldPath, String>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `path`, or clears the entry when `message` is `None`.
    pub fn set(&mut self, path: FieldPath, message: Option<String>) {
        match message {
            Some(message) => {
                self.errors.insert(path, message);
            }
            None => {
                self.errors.remove(&path);
            }
        }
    }

    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.errors.insert(path, message.into());
    }

    #[must_use]
    pub fn get(&self, path: FieldPath) -> Option<&str> {
        self.errors.get(&path).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, path: FieldPath) -> bool {
        self.errors.contains_key(&path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> {
        self.errors.iter().map(|(path, msg)| (*path, msg.as_str()))
    }

    /// Drops the errors of the actor at `removed` and moves errors of every
    /// later actor one position down.
    pub fn remove_actor(&mut self, removed: usize) {
        let errors = std::mem::take(&mut self.errors);
        self.errors = errors
            .into_iter()
            .filter_map(|(path, message)| match path {
                FieldPath::Actor { index, .. } if index == removed => None,
                FieldPath::Actor { index, field } if index > removed => {
                    Some((FieldPath::Actor { index: index - 1, field }, message))
                }
                other => Some((other, message)),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fields::{MovieField, PersonField};

    #[test]
    fn set_none_clears_entry() {
        let mut errors = ValidationErrors::new();
        let path = FieldPath::Movie(MovieField::Plot);
        errors.set(path, Some("Plot is required".into()));
        assert_eq!(errors.get(path), Some("Plot is required"));
        errors.set(path, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn removing_an_actor_rekeys_later_entries() {
        let mut errors = ValidationErrors::new();
        errors.insert(FieldPath::Producer(PersonField::Name), "producer");
        errors.insert(FieldPath::actor(0, PersonField::Name), "zero");
        errors.insert(FieldPath::actor(1, PersonField::Dob), "one");
        errors.insert(FieldPath::actor(2, PersonField::Bio), "two");
        errors.insert(FieldPath::actor(10, PersonField::Name), "ten");

        errors.remove_actor(1);

        assert_eq!(errors.get(FieldPath::Producer(PersonField::Name)), Some("producer"));
        assert_eq!(errors.get(FieldPath::actor(0, PersonField::Name)), Some("zero"));
        assert!(!errors.contains(FieldPath::actor(1, PersonField::Dob)));
        assert_eq!(errors.get(FieldPath::actor(1, PersonField::Bio)), Some("two"));
        assert_eq!(errors.get(FieldPath::actor(9, PersonField::Name)), Some("ten"));
        assert_eq!(errors.len(), 4);
    }
}
