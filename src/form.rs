use clap::ValueEnum;
use serde::Serialize;

use crate::age::{AgeResult, age_between};
use crate::clock::Clock;
use crate::validate::{Field, ValidationResult, validate};

/// The three text fields as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawInput {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl RawInput {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Day => &self.day,
            Field::Month => &self.month,
            Field::Year => &self.year,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Day => &mut self.day,
            Field::Month => &mut self.month,
            Field::Year => &mut self.year,
        };
        *slot = value.into();
    }
}

/// When validation runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValidationMode {
    /// Validate once per explicit submission.
    #[default]
    Batch,
    /// Validate after every edit and compute as soon as all fields pass.
    Immediate,
}

/// A birth-date form session.
///
/// Owns the raw input, the last validation outcome and the last computed
/// age. Any edit clears the computed age, so a shown result always matches
/// the current input.
pub struct Form<C> {
    clock: C,
    mode: ValidationMode,
    input: RawInput,
    validation: ValidationResult,
    age: Option<AgeResult>,
}

impl<C: Clock> Form<C> {
    pub fn new(clock: C, mode: ValidationMode) -> Self {
        Self {
            clock,
            mode,
            input: RawInput::default(),
            validation: ValidationResult::default(),
            age: None,
        }
    }

    pub fn with_input(clock: C, mode: ValidationMode, input: RawInput) -> Self {
        let mut form = Self::new(clock, mode);
        form.input = input;
        form
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn input(&self) -> &RawInput {
        &self.input
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn age(&self) -> Option<AgeResult> {
        self.age
    }

    /// Replaces one field. In immediate mode this also validates and, when
    /// everything passes, computes the age.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> Option<AgeResult> {
        self.input.set(field, value);
        self.age = None;

        match self.mode {
            ValidationMode::Immediate => self.submit(),
            ValidationMode::Batch => None,
        }
    }

    /// Validates the whole form and computes the age if it is valid.
    pub fn submit(&mut self) -> Option<AgeResult> {
        let today = self.clock.today();
        let mut validation = validate(&self.input, today);
        self.age = None;

        match validation.fields() {
            Some(fields) => match age_between(fields.day, fields.month, fields.year, today) {
                Ok(age) => {
                    log::info!("computed age {age} on {today}");
                    self.age = Some(age);
                }
                Err(e) => {
                    log::warn!(
                        "rejected date {}-{}-{}: {e}",
                        fields.year,
                        fields.month,
                        fields.day
                    );
                    validation.reject_date(e);
                }
            },
            None => log::warn!("submission rejected: {:?}", validation.messages()),
        }

        self.validation = validation;
        self.age
    }

    /// Empties every field and forgets errors and results.
    pub fn clear(&mut self) {
        self.input = RawInput::default();
        self.validation = ValidationResult::default();
        self.age = None;
    }
}
