//! Daily selection over the 3-hourly forecast feed.

use crate::model::ForecastSample;

/// Time-of-day component that marks a day's representative sample.
pub const MIDDAY: &str = "12:00:00";

/// Maximum number of days kept.
pub const FORECAST_DAYS: usize = 5;

/// Keeps the midday sample of each day, in feed order, at most five of them.
///
/// Matching is done on the provider's own `dt_txt` formatting, which is
/// already expressed at the location. Days without a midday sample are
/// skipped rather than filled.
pub fn sample_daily(samples: &[ForecastSample]) -> Vec<ForecastSample> {
    samples
        .iter()
        .filter(|s| is_midday(&s.sample_time_text))
        .take(FORECAST_DAYS)
        .cloned()
        .collect()
}

fn is_midday(sample_time_text: &str) -> bool {
    sample_time_text
        .split_once(' ')
        .is_some_and(|(_, time)| time == MIDDAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(dt: i64, text: &str) -> ForecastSample {
        ForecastSample {
            sample_time_unix: dt,
            sample_time_text: text.to_string(),
            temperature_c: 20.0,
            condition_main: "Clear".to_string(),
            icon_id: "01d".to_string(),
        }
    }

    /// 3-hourly feed starting at `2024-05-01 00:00:00`.
    fn feed(len: usize) -> Vec<ForecastSample> {
        let start = 1_714_521_600;
        (0..len)
            .map(|i| {
                let day = 1 + i / 8;
                let hour = (i % 8) * 3;
                sample(
                    start + (i as i64) * 10_800,
                    &format!("2024-05-{day:02} {hour:02}:00:00"),
                )
            })
            .collect()
    }

    #[test]
    fn five_full_days_yield_five_middays() {
        let out = sample_daily(&feed(40));
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|s| s.sample_time_text.contains("12:00:00")));

        let days: Vec<_> = out.iter().map(|s| &s.sample_time_text[..10]).collect();
        assert_eq!(
            days,
            ["2024-05-01", "2024-05-02", "2024-05-03", "2024-05-04", "2024-05-05"]
        );
    }

    #[test]
    fn never_more_than_five() {
        assert_eq!(sample_daily(&feed(64)).len(), 5);
    }

    #[test]
    fn partial_final_day_gives_fewer() {
        // Four full days plus the first three samples of day five (00, 03, 06).
        assert_eq!(sample_daily(&feed(35)).len(), 4);
    }

    #[test]
    fn day_without_midday_is_omitted() {
        let mut samples = feed(40);
        samples.retain(|s| s.sample_time_text != "2024-05-02 12:00:00");

        let out = sample_daily(&samples);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|s| !s.sample_time_text.starts_with("2024-05-02")));
    }

    #[test]
    fn preserves_input_order() {
        let samples = vec![
            sample(3, "2024-05-03 12:00:00"),
            sample(1, "2024-05-01 12:00:00"),
        ];
        let out = sample_daily(&samples);
        assert_eq!(out[0].sample_time_unix, 3);
        assert_eq!(out[1].sample_time_unix, 1);
    }

    #[test]
    fn empty_feed() {
        assert!(sample_daily(&[]).is_empty());
    }
}
