use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// A point on the map, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// What the user asked for: a typed city name or a picked point.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupQuery {
    ByName(String),
    ByCoords(Coordinates),
}

impl LookupQuery {
    pub fn by_name(city: impl Into<String>) -> Self {
        Self::ByName(city.into())
    }

    pub const fn by_coords(lat: f64, lon: f64) -> Self {
        Self::ByCoords(Coordinates::new(lat, lon))
    }
}

/// Resolved location, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country_code: String,
    pub coords: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: Location,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_kmh: f64,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_id: String,
    pub observed_at_unix: i64,
    pub utc_offset_seconds: i64,
}

/// One entry of the 3-hourly forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub sample_time_unix: i64,
    /// Provider-formatted timestamp, e.g. `2024-05-01 12:00:00`.
    pub sample_time_text: String,
    pub temperature_c: f64,
    pub condition_main: String,
    pub icon_id: String,
}

/// Everything one successful lookup produces, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBundle {
    pub current: CurrentConditions,
    pub daily: Vec<ForecastSample>,
    pub theme: Theme,
    /// Where the map should be recentered.
    pub focus: Coordinates,
}
