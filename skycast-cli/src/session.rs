//! Prompt-driven session: credential entry, then a loop of lookups.

use anyhow::Result;
use inquire::{Password, PasswordDisplayMode, Text};
use skycast_core::{
    AppState, CredentialError, CredentialState, CredentialStore, LookupError, LookupOutcome,
    LookupQuery, StartupAction,
};

use crate::render;

/// The single user-facing error channel.
pub fn report_error(error: &LookupError) {
    log::debug!("lookup error detail: {}", error.detail());
    eprintln!("\n  !! {error}\n");
}

/// Asks until a non-blank key is stored; returns the default-city lookup.
pub fn prompt_credential<S: CredentialStore>(app: &mut AppState<S>) -> Result<LookupQuery> {
    loop {
        let input = Password::new("OpenWeather API key:")
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()?;

        match app.submit_credential(&input) {
            Ok(next) => return Ok(next),
            Err(CredentialError::Empty) => eprintln!("{}", CredentialError::Empty),
            Err(e) => return Err(e.into()),
        }
    }
}

pub fn ensure_credential<S: CredentialStore>(app: &mut AppState<S>) -> Result<()> {
    if app.credential_state() == CredentialState::Unset {
        prompt_credential(app)?;
    }
    Ok(())
}

/// Runs until the user submits a blank location.
pub async fn interactive<S: CredentialStore>(app: &mut AppState<S>) -> Result<()> {
    'startup: loop {
        let mut next = match app.startup() {
            StartupAction::PromptForCredential => prompt_credential(app)?,
            StartupAction::Lookup(query) => query,
        };

        let mut last_city = app.default_city().to_string();

        loop {
            match app.run_lookup(&next).await {
                LookupOutcome::Rendered(bundle) => {
                    last_city = bundle.current.location.name.clone();
                    print!("{}", render::bundle(&bundle));
                }
                LookupOutcome::Ignored => {}
                LookupOutcome::Failed { error, restart } => {
                    report_error(&error);
                    if restart {
                        continue 'startup;
                    }
                }
            }

            let input = Text::new("City or lat,lon (blank to quit):")
                .with_initial_value(&last_city)
                .prompt_skippable()?;

            match input.as_deref().map(str::trim) {
                None | Some("") => return Ok(()),
                Some(text) => next = parse_location(text),
            }
        }
    }
}

/// `"lat,lon"` becomes a point; anything else is a city name.
pub fn parse_location(input: &str) -> LookupQuery {
    let input = input.trim();

    if let Some((lat, lon)) = input.split_once(',') {
        if let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
            if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
                return LookupQuery::by_coords(lat, lon);
            }
        }
    }

    LookupQuery::by_name(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_detected() {
        assert_eq!(parse_location("-26.2, 28.04"), LookupQuery::by_coords(-26.2, 28.04));
        assert_eq!(parse_location("51.5,-0.12"), LookupQuery::by_coords(51.5, -0.12));
    }

    #[test]
    fn city_with_country_stays_a_name() {
        assert_eq!(parse_location("Paris,FR"), LookupQuery::by_name("Paris,FR"));
        assert_eq!(parse_location("  Durban "), LookupQuery::by_name("Durban"));
    }

    #[test]
    fn out_of_range_numbers_are_a_name() {
        assert_eq!(parse_location("100,200"), LookupQuery::by_name("100,200"));
    }
}
