//! Dashboard aggregation.
//!
//! Composes the health-impact classifier, trend analyzer, and seasonal
//! resolver with the raw fixture rows into one snapshot. The first
//! reading (most-recent-first ordering) is the network's current state.
//! Everything here is a pure function of its inputs — the timestamp is
//! passed in so callers decide what "now" means.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::models::{PollutionSource, Reading};
use crate::errors::AppError;
use crate::helpers::{round_1dp, station_display_name};
use crate::services::health_impact::{self, HealthImpact};
use crate::services::seasonal::{self, SeasonalContext};
use crate::services::trend::{self, TrendResult};

/// How many source rows the snapshot keeps as "top sources".
const TOP_SOURCES: usize = 5;

/// Pollutant concentrations for the current reading (µg/m³, CO in mg/m³).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Pollutants {
    pub pm25: f64,
    pub pm10: f64,
    pub so2: f64,
    pub no2: f64,
    pub co: f64,
    pub o3: f64,
}

/// Weather conditions at the current reading's station.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeatherConditions {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Compass direction the wind blows from (e.g. "NW")
    pub wind_direction: String,
    /// Air pressure in hPa
    pub pressure: f64,
}

/// Identity of the station behind the current reading.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StationInfo {
    /// Display name ("Anand Vihar")
    pub name: String,
    /// Fixture identifier ("anand_vihar")
    pub id: String,
    pub location: String,
}

/// One pollution-source row, passed through with numeric coercion only.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SourceContribution {
    pub source_type: String,
    pub location: String,
    pub contribution_percent: f64,
    pub confidence: f64,
}

/// Summary of the source-attribution fixture rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SourceSummary {
    /// Leading rows in fixture order (at most five)
    pub top_sources: Vec<SourceContribution>,
    /// Sum of all contribution percentages
    pub total_contribution: f64,
    /// Source type of the first row, if any
    pub dominant_source: Option<String>,
}

/// Composed dashboard snapshot: current reading plus all three derived
/// results and the source summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardData {
    /// Snapshot timestamp (ISO 8601)
    pub timestamp: String,
    pub current_aqi: f64,
    pub health: HealthImpact,
    pub trend: TrendResult,
    pub seasonal_context: SeasonalContext,
    pub primary_pollutant: String,
    pub pollutants: Pollutants,
    pub weather: WeatherConditions,
    pub station: StationInfo,
    pub sources: SourceSummary,
    /// Number of stations reporting in the readings fixture
    pub active_stations: usize,
}

/// Build the dashboard snapshot from fixture rows.
///
/// Returns [`AppError::NoData`] when `readings` is empty — the one
/// defined error condition; every non-empty input composes successfully.
pub fn build_dashboard(
    readings: &[Reading],
    sources: &[PollutionSource],
    window_size: usize,
    now: DateTime<Utc>,
) -> Result<DashboardData, AppError> {
    let current = readings
        .first()
        .ok_or_else(|| AppError::NoData("No AQI data available".to_string()))?;

    let health = health_impact::classify(current.aqi);
    let trend = trend::analyze_trend(readings, window_size);
    let seasonal_context = seasonal::resolve_at(now);

    let top_sources: Vec<SourceContribution> = sources
        .iter()
        .take(TOP_SOURCES)
        .map(|s| SourceContribution {
            source_type: s.source_type.clone(),
            location: s.location.clone(),
            contribution_percent: s.contribution_percent,
            confidence: s.confidence(),
        })
        .collect();

    let total_contribution = round_1dp(sources.iter().map(|s| s.contribution_percent).sum());

    Ok(DashboardData {
        timestamp: now.to_rfc3339(),
        current_aqi: current.aqi,
        health,
        trend,
        seasonal_context,
        primary_pollutant: current.primary_pollutant().to_string(),
        pollutants: Pollutants {
            pm25: current.pm25(),
            pm10: current.pm10(),
            so2: current.so2(),
            no2: current.no2(),
            co: current.co(),
            o3: current.o3(),
        },
        weather: WeatherConditions {
            temperature: current.temperature(),
            humidity: current.humidity(),
            wind_speed: current.wind_speed(),
            wind_direction: current.wind_direction().to_string(),
            pressure: current.pressure(),
        },
        station: StationInfo {
            name: station_display_name(&current.station_id),
            id: current.station_id.clone(),
            location: current.location().to_string(),
        },
        sources: SourceSummary {
            dominant_source: sources.first().map(|s| s.source_type.clone()),
            top_sources,
            total_contribution,
        },
        active_stations: readings.len(),
    })
}
