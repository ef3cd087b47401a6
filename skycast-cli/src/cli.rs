use anyhow::Context;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use skycast_core::{AppState, Config, FileCredentialStore, LookupOutcome, LookupQuery};

use crate::{
    render,
    session::{self, report_error},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enter and store the OpenWeather API key.
    Configure,

    /// Show weather for a city (the configured default when omitted).
    Show {
        /// City name, optionally with a country code, e.g. "Paris,FR".
        city: Option<String>,
    },

    /// Show weather for a point.
    At {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },

    /// Remove the stored API key.
    Forget,
}

impl Cli {
    /// Lookup failures are reported on stderr and turned into a failing exit
    /// code; only setup errors come back as `Err`.
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;
        let store = FileCredentialStore::platform()?;
        let mut app = AppState::new(&config, store).context("Failed to read stored credential")?;

        match self.command {
            None => {
                session::interactive(&mut app).await?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Configure) => {
                session::prompt_credential(&mut app)?;
                println!("API key saved.");
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Show { city }) => {
                let city = city.unwrap_or_else(|| app.default_city().to_string());
                one_shot(&mut app, LookupQuery::ByName(city)).await
            }
            Some(Command::At { lat, lon }) => {
                one_shot(&mut app, LookupQuery::by_coords(lat, lon)).await
            }
            Some(Command::Forget) => {
                app.forget_credential()?;
                println!("API key removed.");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn one_shot(
    app: &mut AppState<FileCredentialStore>,
    query: LookupQuery,
) -> anyhow::Result<ExitCode> {
    session::ensure_credential(app)?;
    Ok(finish(app.run_lookup(&query).await))
}

/// Prints the outcome of a one-shot lookup. Errors are printed once, here.
fn finish(outcome: LookupOutcome) -> ExitCode {
    match outcome {
        LookupOutcome::Rendered(bundle) => {
            print!("{}", render::bundle(&bundle));
            ExitCode::SUCCESS
        }
        LookupOutcome::Ignored => {
            eprintln!("No city given.");
            ExitCode::FAILURE
        }
        LookupOutcome::Failed { error, restart } => {
            report_error(&error);
            if restart {
                eprintln!("Run `skycast configure` to enter a new API key.");
            }
            ExitCode::FAILURE
        }
    }
}
