//! One lookup cycle: current conditions, then forecast, then composition.

use log::{debug, info};

use crate::{
    error::LookupError,
    forecast::sample_daily,
    model::{CurrentConditions, ForecastSample, LookupQuery, RenderBundle},
    provider::WeatherProvider,
    theme::select_theme,
    time_of_day::is_night,
};

/// Runs both requests in order and composes the result.
///
/// The forecast is requested at the coordinates the provider resolved for the
/// first call, not at the caller's input. Any failure aborts the cycle before
/// anything is composed.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    query: &LookupQuery,
) -> Result<RenderBundle, LookupError> {
    let current = provider.current(query).await.inspect_err(|e| {
        debug!("current conditions lookup for {query:?} failed: {}", e.detail());
    })?;

    let resolved = current.location.coords;
    let samples = provider.forecast(resolved).await.inspect_err(|e| {
        debug!("forecast lookup at {resolved:?} failed: {}", e.detail());
    })?;

    let bundle = compose(current, &samples);
    info!(
        "resolved {:?} to {}, {} ({} forecast days, theme {})",
        query,
        bundle.current.location.name,
        bundle.current.location.country_code,
        bundle.daily.len(),
        bundle.theme,
    );

    Ok(bundle)
}

/// Builds the render bundle from already-fetched data. Pure.
pub fn compose(current: CurrentConditions, samples: &[ForecastSample]) -> RenderBundle {
    let night = is_night(current.observed_at_unix, current.utc_offset_seconds);
    let theme = select_theme(&current.condition_main, night);
    let focus = current.location.coords;

    RenderBundle {
        daily: sample_daily(samples),
        theme,
        focus,
        current,
    }
}
