mod age;
mod cli;
mod clock;
mod config;
mod error;
mod form;
mod render;
mod session;
mod validate;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use form::{Form, RawInput};
use tokio::io::{self, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;
    log::debug!("resolved config: {config:?}");

    match cli.command {
        Commands::Calc { day, month, year } => calc(&config, RawInput::new(day, month, year)).await,
        Commands::Form => {
            let mut form = Form::new(config.clock(), config.mode);
            session::run(&mut form, config.json, BufReader::new(io::stdin()), io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// One submission of the form. Exits with status 1 when the input is rejected.
async fn calc(config: &Config, input: RawInput) -> Result<ExitCode> {
    let mut form = Form::with_input(config.clock(), config.mode, input);
    form.submit();
    let accepted = form.validation().is_valid();

    if accepted || config.json {
        let mut out = render::render(&form, config.json)?;
        if !out.ends_with('\n') {
            out.push('\n');
        }
        let mut stdout = io::stdout();
        stdout
            .write_all(out.as_bytes())
            .await
            .context("Failed to write output")?;
        stdout.flush().await.context("Failed to flush output")?;
    } else {
        for (key, message) in form.validation().messages() {
            eprintln!("{key}: {message}");
        }
    }

    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
