use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{Coordinates, CurrentConditions, ForecastSample, Location, LookupQuery},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Metric wind speed arrives in m/s.
const MPS_TO_KMH: f64 = 3.6;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url)
    }

    fn location_params(query: &LookupQuery) -> Vec<(&'static str, String)> {
        match query {
            LookupQuery::ByName(city) => vec![("q", city.clone())],
            LookupQuery::ByCoords(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
        }
    }

    async fn get(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<reqwest::Response, LookupError> {
        debug!("GET {} {:?}", endpoint, params);

        params.push(("units", "metric".to_string()));
        params.push(("appid", self.api_key.clone()));

        self.http
            .get(self.endpoint(endpoint))
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the credential in its query string.
                LookupError::transient(format!(
                    "request to /{endpoint} failed: {}",
                    e.without_url()
                ))
            })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &LookupQuery) -> Result<CurrentConditions, LookupError> {
        let res = self.get("weather", Self::location_params(query)).await?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| {
                LookupError::transient(format!("failed to read current body: {}", e.without_url()))
            })?;

        if !status.is_success() {
            let err = LookupError::from_status(status.as_u16());
            debug!("current conditions request failed with {}: {}", status, truncate_body(&body));
            return Err(err);
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::transient(format!("failed to parse current JSON: {e}")))?;

        Ok(parsed.into())
    }

    async fn forecast(&self, at: Coordinates) -> Result<Vec<ForecastSample>, LookupError> {
        let params = vec![("lat", at.lat.to_string()), ("lon", at.lon.to_string())];
        let res = self.get("forecast", params).await?;

        // The status is not inspected here: an error payload simply fails to
        // decode as a forecast.
        let body = res
            .text()
            .await
            .map_err(|e| {
                LookupError::transient(format!("failed to read forecast body: {}", e.without_url()))
            })?;

        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|e| {
            LookupError::transient(format!(
                "failed to parse forecast JSON: {e}: {}",
                truncate_body(&body)
            ))
        })?;

        Ok(parsed.list.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    sys: OwSys,
    main: OwMain,
    wind: OwWind,
    #[serde(default)]
    visibility: u32,
    weather: Vec<OwWeather>,
    dt: i64,
    timezone: i64,
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(r: OwCurrentResponse) -> Self {
        let (condition_main, condition_description, icon_id) = match r.weather.into_iter().next() {
            Some(w) => (w.main, w.description, w.icon),
            None => ("Unknown".to_string(), "Unknown".to_string(), String::new()),
        };

        CurrentConditions {
            location: Location {
                name: r.name,
                country_code: r.sys.country,
                coords: Coordinates::new(r.coord.lat, r.coord.lon),
            },
            temperature_c: r.main.temp,
            feels_like_c: r.main.feels_like,
            humidity_pct: r.main.humidity,
            wind_speed_kmh: r.wind.speed * MPS_TO_KMH,
            pressure_hpa: r.main.pressure,
            visibility_m: r.visibility,
            condition_main,
            condition_description,
            icon_id,
            observed_at_unix: r.dt,
            utc_offset_seconds: r.timezone,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastWeather {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(e: OwForecastEntry) -> Self {
        let (condition_main, icon_id) = match e.weather.into_iter().next() {
            Some(w) => (w.main, w.icon),
            None => ("Unknown".to_string(), String::new()),
        };

        ForecastSample {
            sample_time_unix: e.dt,
            sample_time_text: e.dt_txt,
            temperature_c: e.main.temp,
            condition_main,
            icon_id,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
