//! AQI trend analysis over the recent reading history.
//!
//! Compares the average AQI of the most recent window of readings
//! against the window immediately before it. Readings are assumed
//! most-recent-first, matching fixture row order.

use serde::Serialize;
use utoipa::ToSchema;

use crate::data::models::Reading;
use crate::helpers::round_1dp;

/// Default comparison window in readings (one per day → one week).
pub const DEFAULT_WINDOW: usize = 7;

/// Threshold in percent beyond which a change counts as a real trend.
const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Direction of the recent AQI trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Worsening,
    Improving,
    Stable,
    /// Fewer readings than one full window — kept distinct from
    /// `Stable` because "we cannot tell" is not "nothing changed".
    InsufficientData,
}

/// Result of a trend comparison between two adjacent windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct TrendResult {
    pub trend: Trend,
    /// Percent change of the recent window average vs the older one,
    /// rounded to one decimal place.
    pub change_percent: f64,
}

/// Compare the first `window_size` readings against the next (up to)
/// `window_size` readings.
///
/// - fewer than `window_size` readings → `InsufficientData`
/// - no readings beyond the recent window → `Stable`
/// - older-window average of zero → `Stable` (a percent change against
///   a zero baseline is undefined, so no trend is claimed)
pub fn analyze_trend(readings: &[Reading], window_size: usize) -> TrendResult {
    if window_size == 0 || readings.len() < window_size {
        return TrendResult {
            trend: Trend::InsufficientData,
            change_percent: 0.0,
        };
    }

    let recent = &readings[..window_size];
    let older_end = (window_size * 2).min(readings.len());
    let older = &readings[window_size..older_end];

    if older.is_empty() {
        return TrendResult {
            trend: Trend::Stable,
            change_percent: 0.0,
        };
    }

    let recent_avg = mean_aqi(recent);
    let older_avg = mean_aqi(older);

    if older_avg == 0.0 {
        return TrendResult {
            trend: Trend::Stable,
            change_percent: 0.0,
        };
    }

    let change_percent = round_1dp((recent_avg - older_avg) / older_avg * 100.0);

    let trend = if change_percent > TREND_THRESHOLD_PCT {
        Trend::Worsening
    } else if change_percent < -TREND_THRESHOLD_PCT {
        Trend::Improving
    } else {
        Trend::Stable
    };

    TrendResult {
        trend,
        change_percent,
    }
}

fn mean_aqi(readings: &[Reading]) -> f64 {
    readings.iter().map(|r| r.aqi).sum::<f64>() / readings.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(aqis: &[f64]) -> Vec<Reading> {
        aqis.iter()
            .map(|&aqi| Reading {
                station_id: "central_delhi".to_string(),
                aqi,
                pm25: None,
                pm10: None,
                so2: None,
                no2: None,
                co: None,
                o3: None,
                temperature: None,
                humidity: None,
                wind_speed: None,
                wind_direction: None,
                pressure: None,
                primary_pollutant: None,
                location: None,
            })
            .collect()
    }

    #[test]
    fn test_fewer_than_window_is_insufficient_data() {
        let result = analyze_trend(&readings(&[200.0, 210.0, 190.0]), DEFAULT_WINDOW);
        assert_eq!(result.trend, Trend::InsufficientData);
        assert_eq!(result.change_percent, 0.0);
    }

    #[test]
    fn test_exactly_one_window_is_stable() {
        // Seven readings fill the recent window; nothing older to compare.
        let result = analyze_trend(
            &readings(&[200.0, 210.0, 190.0, 205.0, 195.0, 200.0, 200.0]),
            DEFAULT_WINDOW,
        );
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.change_percent, 0.0);
    }

    #[test]
    fn test_fifty_percent_rise_is_worsening() {
        let mut data = vec![300.0; 7];
        data.extend(vec![200.0; 7]);
        let result = analyze_trend(&readings(&data), DEFAULT_WINDOW);
        assert_eq!(result.trend, Trend::Worsening);
        assert_eq!(result.change_percent, 50.0);
    }

    #[test]
    fn test_fall_is_improving() {
        let mut data = vec![150.0; 7];
        data.extend(vec![300.0; 7]);
        let result = analyze_trend(&readings(&data), DEFAULT_WINDOW);
        assert_eq!(result.trend, Trend::Improving);
        assert_eq!(result.change_percent, -50.0);
    }

    #[test]
    fn test_equal_averages_are_stable() {
        let mut data = vec![250.0; 7];
        data.extend(vec![250.0; 7]);
        let result = analyze_trend(&readings(&data), DEFAULT_WINDOW);
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.change_percent, 0.0);
    }

    #[test]
    fn test_five_percent_change_is_still_stable() {
        // Exactly +5% sits on the threshold and does not count as worsening.
        let mut data = vec![210.0; 7];
        data.extend(vec![200.0; 7]);
        let result = analyze_trend(&readings(&data), DEFAULT_WINDOW);
        assert_eq!(result.change_percent, 5.0);
        assert_eq!(result.trend, Trend::Stable);
    }

    #[test]
    fn test_just_over_five_percent_is_worsening() {
        let mut data = vec![211.0; 7];
        data.extend(vec![200.0; 7]);
        let result = analyze_trend(&readings(&data), DEFAULT_WINDOW);
        assert_eq!(result.change_percent, 5.5);
        assert_eq!(result.trend, Trend::Worsening);
    }

    #[test]
    fn test_partial_older_window_uses_remainder() {
        // Ten readings: recent = first 7, older = remaining 3.
        let mut data = vec![260.0; 7];
        data.extend(vec![200.0; 3]);
        let result = analyze_trend(&readings(&data), DEFAULT_WINDOW);
        assert_eq!(result.trend, Trend::Worsening);
        assert_eq!(result.change_percent, 30.0);
    }

    #[test]
    fn test_zero_older_average_is_stable() {
        let mut data = vec![120.0; 7];
        data.extend(vec![0.0; 7]);
        let result = analyze_trend(&readings(&data), DEFAULT_WINDOW);
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.change_percent, 0.0);
    }

    #[test]
    fn test_change_percent_rounds_to_one_decimal() {
        // recent avg 201, older avg 300 → -33.0% after rounding
        let mut data = vec![201.0; 7];
        data.extend(vec![300.0; 7]);
        let result = analyze_trend(&readings(&data), DEFAULT_WINDOW);
        assert_eq!(result.change_percent, -33.0);
    }

    #[test]
    fn test_custom_window_size() {
        let data = readings(&[100.0, 100.0, 200.0, 200.0]);
        let result = analyze_trend(&data, 2);
        assert_eq!(result.trend, Trend::Improving);
        assert_eq!(result.change_percent, -50.0);
    }

    #[test]
    fn test_zero_window_is_insufficient_data() {
        let result = analyze_trend(&readings(&[100.0]), 0);
        assert_eq!(result.trend, Trend::InsufficientData);
    }

    #[test]
    fn test_trend_serializes_snake_case() {
        let json = serde_json::to_string(&Trend::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient_data\"");
        let json = serde_json::to_string(&Trend::Worsening).unwrap();
        assert_eq!(json, "\"worsening\"");
    }
}
