//! Field-level validation of the birth-date form.
//!
//! Each field is checked in isolation: presence first, then that it is a
//! plain non-negative integer, then its range. Whether the three values form
//! a real calendar date is decided later, when the date is composed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{DateError, UnknownField, ValidationError};
use crate::form::RawInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Day,
    Month,
    Year,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Day, Field::Month, Field::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Field::Day),
            "month" => Ok(Field::Month),
            "year" => Ok(Field::Year),
            _ => Err(UnknownField),
        }
    }
}

/// Day, month and year that each passed field validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthFields {
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

/// Outcome of validating the whole form.
///
/// Holds at most one error per field plus an optional error for the composed
/// date. `fields` is only set when every field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, ValidationError>,
    date: Option<DateError>,
    fields: Option<BirthFields>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.date.is_none()
    }

    pub fn field(&self, field: Field) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn date(&self) -> Option<DateError> {
        self.date
    }

    pub fn fields(&self) -> Option<BirthFields> {
        self.fields
    }

    /// Records a failure of the composed date. The field values stay
    /// available, but the result no longer counts as valid.
    pub fn reject_date(&mut self, err: DateError) {
        self.date = Some(err);
    }

    /// Error messages keyed by field name, in form order, with the composed
    /// date last under `date`.
    pub fn messages(&self) -> Vec<(&'static str, String)> {
        let mut out: Vec<(&'static str, String)> = Field::ALL
            .into_iter()
            .filter_map(|field| Some((field.as_str(), self.field(field)?.to_string())))
            .collect();
        if let Some(err) = self.date() {
            out.push(("date", err.to_string()));
        }
        out
    }
}

/// Validates one raw field value and returns the parsed number.
pub fn validate_field(field: Field, raw: &str, today: NaiveDate) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField);
    }

    // `u32::from_str` also accepts a leading '+', which a numeric input never produces
    let value = if raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse::<u32>().ok()
    } else {
        None
    };
    let value = value.ok_or(ValidationError::OutOfRange(field))?;

    match field {
        Field::Day if !(1..=31).contains(&value) => Err(ValidationError::OutOfRange(field)),
        Field::Month if !(1..=12).contains(&value) => Err(ValidationError::OutOfRange(field)),
        Field::Year if value == 0 => Err(ValidationError::OutOfRange(field)),
        Field::Year if i64::from(value) > i64::from(today.year()) => {
            Err(ValidationError::FutureYear)
        }
        _ => Ok(value),
    }
}

/// Validates all three fields of `input` against `today`.
pub fn validate(input: &RawInput, today: NaiveDate) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mut values = [0u32; 3];

    for (slot, field) in values.iter_mut().zip(Field::ALL) {
        match validate_field(field, input.get(field), today) {
            Ok(v) => *slot = v,
            Err(e) => {
                result.errors.insert(field, e);
            }
        }
    }

    if result.errors.is_empty() {
        let [day, month, year] = values;
        result.fields = Some(BirthFields { day, month, year });
    }

    log::debug!(
        "validated day={:?} month={:?} year={:?}: {} error(s)",
        input.day,
        input.month,
        input.year,
        result.errors.len()
    );

    result
}
