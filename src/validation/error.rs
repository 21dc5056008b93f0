//! Field-level validation errors.

use crate::model::{Field, StepScope};
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single violated field rule. Always user-correctable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{scope}.{field}: {message}")]
pub struct FieldError {
    pub scope: StepScope,
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(scope: StepScope, field: impl Into<Field>, message: impl Into<String>) -> Self {
        Self {
            scope,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted path the form uses to place the message, e.g. `billing.city`.
    pub fn path(&self) -> String {
        format!("{}.{}", self.scope, self.field)
    }
}

/// Current error set, in the order the rules reported them.
///
/// This is the error map the presentation layer reads to render messages
/// next to fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Message for one field, if it failed.
    pub fn get(&self, scope: StepScope, field: impl Into<Field>) -> Option<&str> {
        let field = field.into();
        self.0
            .iter()
            .find(|error| error.scope == scope && error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn contains(&self, scope: StepScope, field: impl Into<Field>) -> bool {
        self.get(scope, field).is_some()
    }

    pub fn for_scope(&self, scope: StepScope) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |error| error.scope == scope)
    }
}

impl From<NonEmptyVec<FieldError>> for FieldErrors {
    fn from(errors: NonEmptyVec<FieldError>) -> Self {
        errors.iter().cloned().collect()
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<String> = self.0.iter().map(FieldError::path).collect();
        write!(f, "{}", paths.join(", "))
    }
}
