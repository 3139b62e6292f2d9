//! Forecast HTTP endpoints.
//!
//! - GET /api/v1/forecasts/weekly

use axum::extract::State;
use axum::Json;
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::store::FixtureStore;
use crate::errors::AppError;

/// One daily forecast entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyForecast {
    /// Forecast date (ISO 8601 date)
    pub date: String,
    /// Predicted AQI
    pub aqi: i64,
    /// Forecast category label (coarser than the health-impact bands)
    pub category: String,
    /// CSS badge class for the category
    pub badge_class: String,
    pub primary_pollutant: String,
    /// Model confidence in [0, 1]
    pub confidence: f64,
    pub health_advisory: String,
}

/// Forecast category and badge class for a predicted AQI.
///
/// The forecast view uses a coarser five-step scale than the
/// health-impact classifier (no 150 boundary, "Satisfactory" instead
/// of "Moderate" for the 51-100 band).
fn forecast_category(aqi: i64) -> (&'static str, &'static str) {
    if aqi <= 50 {
        ("Good", "bg-green-500")
    } else if aqi <= 100 {
        ("Satisfactory", "bg-blue-500")
    } else if aqi <= 200 {
        ("Moderate", "bg-yellow-500")
    } else if aqi <= 300 {
        ("Unhealthy", "bg-orange-500")
    } else {
        ("Very Unhealthy", "bg-red-500")
    }
}

/// Health advisory for a predicted AQI.
fn forecast_advisory(aqi: i64) -> &'static str {
    if aqi > 200 {
        "Avoid outdoor activities"
    } else if aqi > 150 {
        "Limit outdoor exposure"
    } else if aqi > 100 {
        "Sensitive groups caution"
    } else {
        "Good for outdoor activities"
    }
}

fn daily_forecast(date: NaiveDate, aqi: i64, primary_pollutant: &str, confidence: f64) -> DailyForecast {
    let (category, badge_class) = forecast_category(aqi);
    DailyForecast {
        date: date.to_string(),
        aqi,
        category: category.to_string(),
        badge_class: badge_class.to_string(),
        primary_pollutant: primary_pollutant.to_string(),
        confidence,
        health_advisory: forecast_advisory(aqi).to_string(),
    }
}

/// Get the daily AQI forecast, one entry per fixture row starting today.
#[utoipa::path(
    get,
    path = "/api/v1/forecasts/weekly",
    tag = "Forecasts",
    responses(
        (status = 200, description = "Daily AQI forecast entries", body = Vec<DailyForecast>),
    )
)]
pub async fn weekly_forecast(
    State(store): State<FixtureStore>,
) -> Result<Json<Vec<DailyForecast>>, AppError> {
    let rows = store.forecasts()?;
    let today = Utc::now().date_naive();

    let forecasts = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            daily_forecast(
                today + Duration::days(i as i64),
                row.aqi_prediction,
                &row.primary_pollutant,
                row.confidence,
            )
        })
        .collect();

    Ok(Json(forecasts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_category_bands() {
        assert_eq!(forecast_category(50), ("Good", "bg-green-500"));
        assert_eq!(forecast_category(51), ("Satisfactory", "bg-blue-500"));
        assert_eq!(forecast_category(100), ("Satisfactory", "bg-blue-500"));
        assert_eq!(forecast_category(200), ("Moderate", "bg-yellow-500"));
        assert_eq!(forecast_category(300), ("Unhealthy", "bg-orange-500"));
        assert_eq!(forecast_category(301), ("Very Unhealthy", "bg-red-500"));
    }

    #[test]
    fn test_forecast_advisory_tiers() {
        assert_eq!(forecast_advisory(250), "Avoid outdoor activities");
        assert_eq!(forecast_advisory(200), "Limit outdoor exposure");
        assert_eq!(forecast_advisory(151), "Limit outdoor exposure");
        assert_eq!(forecast_advisory(150), "Sensitive groups caution");
        assert_eq!(forecast_advisory(101), "Sensitive groups caution");
        assert_eq!(forecast_advisory(100), "Good for outdoor activities");
    }

    #[test]
    fn test_daily_forecast_composition() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let entry = daily_forecast(date, 285, "PM2.5", 0.82);
        assert_eq!(entry.date, "2026-01-15");
        assert_eq!(entry.category, "Unhealthy");
        assert_eq!(entry.badge_class, "bg-orange-500");
        assert_eq!(entry.health_advisory, "Avoid outdoor activities");
        assert_eq!(entry.confidence, 0.82);
    }
}
