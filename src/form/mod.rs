//! Movie form state and client-side validation.
//!
//! # Organization
//!
//! - [`fields`]: Typed field addresses and their messages
//! - [`validation`]: Field-keyed error collection
//! - [`movie_form`]: The editable form, live validation and submission

pub mod fields;
pub mod movie_form;
pub mod validation;

pub use fields::{FieldPath, MovieField, PersonField};
pub use movie_form::{
    FormMode, FormNotice, MovieForm, MovieSubmission, PersonForm, PosterRule, PosterUpload,
};
pub use validation::ValidationErrors;
