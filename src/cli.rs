use clap::{Parser, Subcommand};

use crate::form::ValidationMode;

#[derive(Parser, Debug)]
#[command(name = "agecalc", version, about = "Calendar-aware age calculator")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_name = "YYYY-MM-DD",
        help = "Compute ages relative to this date instead of the local date [env: AGECALC_TODAY]"
    )]
    pub today: Option<String>,
    #[arg(
        long,
        global = true,
        value_enum,
        help = "Validate on submit (batch) or after every edit (immediate) [env: AGECALC_MODE]"
    )]
    pub mode: Option<ValidationMode>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit one birth date and print the age
    Calc {
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        day: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        month: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        year: String,
    },
    /// Fill in the form interactively, one command per line
    Form,
}
