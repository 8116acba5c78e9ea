use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::age::AgeResult;
use crate::clock::Clock;
use crate::form::{Form, RawInput};

const PLACEHOLDER: &str = "--";
const ALIGN_WIDTH: usize = 10;

/// Serializable snapshot of a form: what the user typed, what is wrong with
/// it, and the last computed age (`null` until one exists).
#[derive(Debug, Serialize)]
pub struct FormState<'a> {
    pub input: &'a RawInput,
    pub errors: BTreeMap<&'static str, String>,
    pub age: Option<AgeResult>,
}

impl<'a> FormState<'a> {
    pub fn of<C: Clock>(form: &'a Form<C>) -> Self {
        Self {
            input: form.input(),
            errors: form.validation().messages().into_iter().collect(),
            age: form.age(),
        }
    }
}

/// Pads `key` with dots so values line up in one column.
pub fn stat_row(key: &str, value: &str, align_width: usize) -> String {
    let dots = match align_width.saturating_sub(key.len()) {
        0 => "".to_string(),
        n => format!("{} ", ".".repeat(n)),
    };
    format!("{key} {dots}{value}")
}

fn field_value(raw: &str) -> &str {
    if raw.is_empty() { PLACEHOLDER } else { raw }
}

/// Plain-text card: the inputs, one line per error, then the result rows.
pub fn render_text<C: Clock>(form: &Form<C>) -> String {
    let input = form.input();
    let mut out = format!(
        "DAY: {}  MONTH: {}  YEAR: {}\n",
        field_value(&input.day),
        field_value(&input.month),
        field_value(&input.year)
    );

    for (key, message) in form.validation().messages() {
        out.push_str(&format!("  {key}: {message}\n"));
    }

    let (years, months, days) = match form.age() {
        Some(age) => (
            age.years.to_string(),
            age.months.to_string(),
            age.days.to_string(),
        ),
        None => (PLACEHOLDER.into(), PLACEHOLDER.into(), PLACEHOLDER.into()),
    };

    for (key, value) in [("years", years), ("months", months), ("days", days)] {
        out.push_str(&stat_row(key, &value, ALIGN_WIDTH));
        out.push('\n');
    }

    out
}

pub fn render_json<C: Clock>(form: &Form<C>) -> Result<String> {
    serde_json::to_string(&FormState::of(form)).context("Failed to serialize form state")
}

/// Text card or single-line JSON, depending on `json`.
pub fn render<C: Clock>(form: &Form<C>, json: bool) -> Result<String> {
    if json {
        render_json(form)
    } else {
        Ok(render_text(form))
    }
}
