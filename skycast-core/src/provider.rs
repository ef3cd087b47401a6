use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::LookupError,
    model::{Coordinates, CurrentConditions, ForecastSample, LookupQuery},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// The two endpoints a lookup cycle needs.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a name or a point. Non-success statuses are
    /// classified into [`LookupError`].
    async fn current(&self, query: &LookupQuery) -> Result<CurrentConditions, LookupError>;

    /// The 3-hourly feed around `at`, in feed order.
    async fn forecast(&self, at: Coordinates) -> Result<Vec<ForecastSample>, LookupError>;
}

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Large icon, used for the current conditions.
pub fn icon_url_large(icon_id: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_id}@2x.png")
}

/// Small icon, used for forecast cards.
pub fn icon_url(icon_id: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_id}.png")
}
