//! Terminal rendering of a lookup result.

use chrono::Local;
use skycast_core::{
    CurrentConditions, ForecastSample, RenderBundle, Theme,
    provider::{icon_url, icon_url_large},
    time_of_day::at_location,
};
use std::fmt;

/// Rounds half up, so -2.5 becomes -2 rather than -3.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn degrees(value: f64) -> String {
    format!("{}°", round_half_up(value))
}

pub fn heading(current: &CurrentConditions) -> String {
    format!("{}, {}", current.location.name, current.location.country_code)
}

pub fn visibility_km(meters: u32) -> String {
    format!("{:.1} km", f64::from(meters) / 1000.0)
}

/// Banner shown above the readout for each theme.
pub fn theme_banner(theme: Theme) -> &'static str {
    match theme {
        Theme::Night => "☾  night",
        Theme::Rainy => "☂  rainy",
        Theme::Cloudy => "☁  cloudy",
        Theme::Clear => "☀  clear",
    }
}

/// Short weekday of a sample at the location's offset.
pub fn weekday(sample_time_unix: i64, utc_offset_seconds: i64) -> String {
    at_location(sample_time_unix, utc_offset_seconds)
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_else(|| "---".to_string())
}

fn forecast_card(
    f: &mut fmt::Formatter<'_>,
    sample: &ForecastSample,
    utc_offset_seconds: i64,
) -> fmt::Result {
    writeln!(
        f,
        "  {:<4} {:>5}  {:<12} {}",
        weekday(sample.sample_time_unix, utc_offset_seconds),
        degrees(sample.temperature_c),
        sample.condition_main,
        icon_url(&sample.icon_id),
    )
}

/// Full readout of a lookup result, written through `Display`.
pub struct BundleView<'a>(&'a RenderBundle);

pub fn bundle(bundle: &RenderBundle) -> BundleView<'_> {
    BundleView(bundle)
}

impl fmt::Display for BundleView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bundle = self.0;
        let c = &bundle.current;

        writeln!(f, "\n[{}]", theme_banner(bundle.theme))?;
        writeln!(f, "{}", heading(c))?;
        writeln!(f, "{}", Local::now().format("%A %H:%M"))?;
        writeln!(f, "{}  {}", degrees(c.temperature_c), c.condition_description)?;
        writeln!(f, "{}", icon_url_large(&c.icon_id))?;
        writeln!(f)?;
        writeln!(f, "  Wind        {:.1} km/h", c.wind_speed_kmh)?;
        writeln!(f, "  Humidity    {}%", c.humidity_pct)?;
        writeln!(f, "  Feels like  {}", degrees(c.feels_like_c))?;
        writeln!(f, "  Visibility  {}", visibility_km(c.visibility_m))?;
        writeln!(f, "  Pressure    {} hPa", c.pressure_hpa)?;
        writeln!(
            f,
            "  Map         {:.4}, {:.4} (zoom {})",
            bundle.focus.lat,
            bundle.focus.lon,
            skycast_core::map::DEFAULT_ZOOM
        )?;

        if !bundle.daily.is_empty() {
            writeln!(f, "\n5-day forecast")?;
            for sample in &bundle.daily {
                forecast_card(f, sample, c.utc_offset_seconds)?;
            }
        }

        Ok(())
    }
}
