//! Core library for the `skycast` weather lookup.
//!
//! This crate defines:
//! - The lookup cycle (current conditions, then the forecast at the resolved point)
//! - Day/night classification, daily forecast sampling and theme selection
//! - Credential lifecycle and configuration handling
//! - The OpenWeather provider
//!
//! It is used by `skycast-cli`, but carries no display code of its own.

pub mod app;
pub mod config;
pub mod credential;
pub mod error;
pub mod forecast;
pub mod lookup;
pub mod map;
pub mod model;
pub mod provider;
pub mod theme;
pub mod time_of_day;

pub use app::{AppState, LookupOutcome};
pub use config::Config;
pub use credential::{
    CredentialError, CredentialGate, CredentialState, CredentialStore, FileCredentialStore,
    MemoryCredentialStore, StartupAction,
};
pub use error::LookupError;
pub use forecast::sample_daily;
pub use lookup::{compose, lookup};
pub use map::MapFocus;
pub use model::{Coordinates, CurrentConditions, ForecastSample, Location, LookupQuery, RenderBundle};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use theme::{Theme, select_theme};
pub use time_of_day::is_night;
