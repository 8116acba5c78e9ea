use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::ValueEnum;

use crate::cli::Cli;
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::form::ValidationMode;

pub const TODAY_ENV: &str = "AGECALC_TODAY";
pub const MODE_ENV: &str = "AGECALC_MODE";

/// Runtime settings. Command-line flags win over environment variables,
/// which win over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pinned "today"; `None` means the local system date.
    pub today: Option<NaiveDate>,
    pub mode: ValidationMode,
    pub json: bool,
}

impl Config {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        Self::from_sources(cli, |key| std::env::var(key).ok())
    }

    fn from_sources(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let today = match (&cli.today, env(TODAY_ENV)) {
            (Some(flag), _) => Some(parse_date(flag).context("Invalid --today")?),
            (None, Some(var)) if !var.trim().is_empty() => {
                Some(parse_date(&var).with_context(|| format!("Invalid {TODAY_ENV}"))?)
            }
            _ => None,
        };

        let mode = match (cli.mode, env(MODE_ENV)) {
            (Some(mode), _) => mode,
            (None, Some(var)) if !var.trim().is_empty() => ValidationMode::from_str(var.trim(), true)
                .map_err(|e| anyhow!("{e}"))
                .with_context(|| format!("Invalid {MODE_ENV}"))?,
            _ => ValidationMode::default(),
        };

        Ok(Self {
            today,
            mode,
            json: cli.json,
        })
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got '{raw}'"))
}
