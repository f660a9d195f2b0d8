//! Validation failures raised while building search models.

use std::fmt;

/// The rule a search field broke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationRule {
    /// A required string was empty or whitespace only.
    Empty,
    /// A paging value was zero.
    NotPositive,
    /// The value is outside the field's fixed set.
    OneOf(&'static [&'static str]),
    /// The field cannot be combined with the named field.
    MutuallyExclusive(&'static str),
    /// A wire timestamp was neither RFC 3339 nor a bare date.
    InvalidTimestamp,
    /// A wire parameter name has no entry in the model's alias table.
    UnknownParameter,
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Empty => write!(f, "must not be empty"),
            ValidationRule::NotPositive => write!(f, "must be a positive integer"),
            ValidationRule::OneOf(allowed) => write!(f, "must be one of {}", allowed.join(", ")),
            ValidationRule::MutuallyExclusive(other) => {
                write!(f, "cannot be set together with {}", other)
            }
            ValidationRule::InvalidTimestamp => {
                write!(f, "must be an RFC 3339 timestamp or YYYY-MM-DD date")
            }
            ValidationRule::UnknownParameter => write!(f, "is not a known parameter"),
        }
    }
}

/// A search model field failed validation at construction time.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {rule}")]
pub struct ValidationError {
    /// Semantic name of the offending field (e.g. `search_in`).
    pub field: String,
    /// The rule that was violated.
    pub rule: ValidationRule,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, rule: ValidationRule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }

    pub(crate) fn one_of(field: &str, allowed: &'static [&'static str]) -> Self {
        Self::new(field, ValidationRule::OneOf(allowed))
    }
}

/// Returns the value unchanged if it belongs to `allowed`, otherwise a
/// [`ValidationRule::OneOf`] error for `field`.
pub(crate) fn check_one_of(
    field: &str,
    value: &str,
    allowed: &'static [&'static str],
) -> Result<&'static str, ValidationError> {
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == value)
        .ok_or_else(|| ValidationError::one_of(field, allowed))
}
