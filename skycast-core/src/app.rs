//! Application state owned by the host.
//!
//! Holds the credential gate and the last successful render. Lookups run one
//! at a time through `&mut self`; a later call simply overwrites what an
//! earlier one wrote.

use anyhow::Result;
use log::{info, warn};

use crate::{
    config::Config,
    credential::{CredentialError, CredentialGate, CredentialState, CredentialStore, StartupAction},
    error::LookupError,
    lookup::lookup,
    map::MapFocus,
    model::{LookupQuery, RenderBundle},
    provider::OpenWeatherProvider,
    theme::Theme,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Rendered(RenderBundle),
    /// Blank city input; nothing was requested.
    Ignored,
    /// Nothing changed on screen. `restart` means the credential was evicted
    /// and the host must go back to the startup flow.
    Failed { error: LookupError, restart: bool },
}

#[derive(Debug)]
pub struct AppState<S> {
    gate: CredentialGate<S>,
    default_city: String,
    base_url: String,
    /// Built from the current credential; `None` while the gate is `Unset`.
    provider: Option<OpenWeatherProvider>,
    theme: Theme,
    map: MapFocus,
    last: Option<RenderBundle>,
}

impl<S: CredentialStore> AppState<S> {
    pub fn new(config: &Config, store: S) -> Result<Self> {
        let mut app = Self {
            gate: CredentialGate::open(store)?,
            default_city: config.default_city.clone(),
            base_url: config.base_url().to_string(),
            provider: None,
            theme: Theme::default(),
            map: MapFocus::default(),
            last: None,
        };
        app.rebuild_provider();
        Ok(app)
    }

    fn rebuild_provider(&mut self) {
        self.provider = self
            .gate
            .credential()
            .map(|key| OpenWeatherProvider::with_base_url(key.to_string(), &self.base_url));
    }

    pub fn startup(&self) -> StartupAction {
        self.gate.startup(&self.default_city)
    }

    pub fn credential_state(&self) -> CredentialState {
        self.gate.state()
    }

    /// Stores the credential and returns the default-city lookup to run next.
    pub fn submit_credential(&mut self, input: &str) -> Result<LookupQuery, CredentialError> {
        self.gate.submit(input)?;
        self.rebuild_provider();
        Ok(LookupQuery::by_name(self.default_city.as_str()))
    }

    pub fn forget_credential(&mut self) -> Result<()> {
        let cleared = self.gate.evict();
        self.rebuild_provider();
        cleared
    }

    pub async fn run_lookup(&mut self, query: &LookupQuery) -> LookupOutcome {
        if let LookupQuery::ByName(city) = query {
            if city.trim().is_empty() {
                return LookupOutcome::Ignored;
            }
        }

        let result = match &self.provider {
            Some(provider) => lookup(provider, query).await,
            None => Err(LookupError::Unauthorized),
        };

        match result {
            Ok(bundle) => {
                self.apply(&bundle);
                LookupOutcome::Rendered(bundle)
            }
            Err(error) => {
                let restart = match self.gate.observe(&error) {
                    Ok(evicted) => evicted,
                    Err(e) => {
                        warn!("failed to remove rejected credential from storage: {e:#}");
                        true
                    }
                };
                if restart {
                    self.rebuild_provider();
                }
                LookupOutcome::Failed { error, restart }
            }
        }
    }

    fn apply(&mut self, bundle: &RenderBundle) {
        self.theme = bundle.theme;
        self.map.recenter(bundle.focus);
        self.last = Some(bundle.clone());
        info!("theme set to {}", self.theme);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn map(&self) -> &MapFocus {
        &self.map
    }

    pub fn last_render(&self) -> Option<&RenderBundle> {
        self.last.as_ref()
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }
}
