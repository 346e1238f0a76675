//! Required-field and custom-validator rules shared by every prompt kind

use std::fmt;
use std::sync::Arc;

/// Message shown when a required prompt receives an empty answer and no
/// custom message was configured
pub const DEFAULT_REQUIRED_MESSAGE: &str = "Required.";

/// Custom validator: returns `Some(message)` to reject a candidate answer.
///
/// An empty message counts as "no error".
pub type Validator<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Whether a prompt must receive a non-empty answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Required {
    #[default]
    No,
    Yes,
    WithMessage(String),
}

impl Required {
    /// The message to print on an empty answer, or `None` if empty answers are allowed
    pub fn message(&self) -> Option<&str> {
        match self {
            Required::No => None,
            Required::Yes => Some(DEFAULT_REQUIRED_MESSAGE),
            Required::WithMessage(message) => Some(message),
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Required::No)
    }
}

impl From<bool> for Required {
    fn from(required: bool) -> Self {
        if required {
            Required::Yes
        } else {
            Required::No
        }
    }
}

impl From<&str> for Required {
    fn from(message: &str) -> Self {
        Required::WithMessage(message.to_string())
    }
}

impl From<String> for Required {
    fn from(message: String) -> Self {
        Required::WithMessage(message)
    }
}

/// Result of checking one candidate answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome<T> {
    Accepted(T),
    Rejected(String),
}

impl<T> ValidationOutcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }
}

/// The rules a candidate answer is checked against
pub struct Rules<'a, T> {
    pub required: &'a Required,
    pub validate: Option<&'a Validator<T>>,
    pub is_empty: fn(&T) -> bool,
}

impl<T> fmt::Debug for Rules<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("required", self.required)
            .field("validate", &self.validate.is_some())
            .finish()
    }
}

/// Check a candidate against the required rule first, then the validator
pub fn check<T>(candidate: T, rules: &Rules<'_, T>) -> ValidationOutcome<T> {
    if let Some(message) = rules.required.message() {
        if (rules.is_empty)(&candidate) {
            return ValidationOutcome::Rejected(message.to_string());
        }
    }

    if let Some(validate) = rules.validate {
        if let Some(error) = validate(&candidate) {
            if !error.is_empty() {
                return ValidationOutcome::Rejected(error);
            }
        }
    }

    ValidationOutcome::Accepted(candidate)
}

/// Wrap a closure as a [`Validator`]
pub fn validator<T, F>(f: F) -> Validator<T>
where
    F: Fn(&T) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(f)
}
