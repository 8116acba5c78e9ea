use thiserror::Error;

use crate::validate::Field;

/// Rejection of a single input field. The `Display` text is what the form
/// shows next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    MissingField,
    #[error("Must be a valid {0}")]
    OutOfRange(Field),
    #[error("Must be in the past")]
    FutureYear,
}

/// Rejection of the date composed from three individually valid fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Must be a valid date")]
    InvalidCalendarDate,
    #[error("Must be in the past")]
    FutureDate,
}

/// A name that is not one of the form's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown field")]
pub struct UnknownField;
