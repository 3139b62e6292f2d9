//! Overview HTTP endpoints.
//!
//! - GET /api/v1/overview/current-aqi?window=N
//! - GET /api/v1/overview/stations
//! - GET /api/v1/overview/source-breakdown
//! - GET /api/v1/overview/source-distribution
//! - GET /api/v1/overview/dashboard
//! - GET /api/v1/overview/alerts
//! - GET /api/v1/overview/health-recommendations

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::data::store::FixtureStore;
use crate::errors::AppError;
use crate::helpers::{source_color, station_display_name};
use crate::services::dashboard::{
    build_dashboard, DashboardData, Pollutants, StationInfo, WeatherConditions,
};
use crate::services::health_impact::{self, AqiCategory, HealthRisk};
use crate::services::seasonal::{self, ImpactLevel, SeasonalContext};
use crate::services::trend::{TrendResult, DEFAULT_WINDOW};

/// Largest accepted trend window. The fixtures hold a few weeks of
/// history at most; anything beyond this is a client mistake.
const MAX_TREND_WINDOW: usize = 90;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrendWindowQuery {
    /// Trend comparison window in readings (default 7)
    pub window: Option<usize>,
}

fn resolve_window(query: &TrendWindowQuery) -> Result<usize, AppError> {
    match query.window {
        None => Ok(DEFAULT_WINDOW),
        Some(0) => Err(AppError::BadRequest(
            "window must be at least 1".to_string(),
        )),
        Some(w) if w > MAX_TREND_WINDOW => Err(AppError::BadRequest(format!(
            "window must be at most {}",
            MAX_TREND_WINDOW
        ))),
        Some(w) => Ok(w),
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Current network-level AQI with derived context.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentAqiResponse {
    pub current_aqi: f64,
    pub category: AqiCategory,
    pub primary_pollutant: String,
    /// Public health advisory for the current band
    pub health_advisory: String,
    pub health_risk: HealthRisk,
    /// Display color for the current band (hex)
    pub color: String,
    pub trend: TrendResult,
    pub seasonal_context: SeasonalContext,
    pub pollutants: Pollutants,
    pub weather: WeatherConditions,
    /// Response timestamp (ISO 8601)
    pub last_updated: String,
    pub station: StationInfo,
}

/// Per-station status line for the station table.
#[derive(Debug, Serialize, ToSchema)]
pub struct StationStatus {
    /// Display name ("Anand Vihar")
    pub name: String,
    pub aqi: f64,
    /// Dominant source inferred from the station's area
    pub primary_source: String,
    /// Qualitative direction label: "rising", "stable", or "falling"
    pub trend: String,
}

/// One source slice for the breakdown chart.
#[derive(Debug, Serialize, ToSchema)]
pub struct SourceBreakdownEntry {
    pub name: String,
    /// Contribution in percent
    pub value: f64,
    /// Number of sensor readings attributing to this source
    pub readings: u32,
}

/// One source slice with its display color.
#[derive(Debug, Serialize, ToSchema)]
pub struct SourceDistributionEntry {
    pub name: String,
    /// Contribution in percent
    pub value: f64,
    /// Display color (hex)
    pub color: String,
}

/// One derived alert.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Alert {
    /// Stable identifier for deduplication on the client
    pub id: String,
    /// Alert class: "emergency", "health", "seasonal", or "source"
    #[serde(rename = "type")]
    pub alert_type: String,
    /// "critical", "high", or "medium"
    pub severity: String,
    pub title: String,
    pub message: String,
    pub action_required: String,
    /// When the alert was derived (ISO 8601)
    pub timestamp: String,
}

/// Alert feed for the current conditions.
#[derive(Debug, Serialize, ToSchema)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
    pub alert_count: usize,
    /// Severity of the first (most severe) alert, or "none"
    pub highest_severity: String,
    pub last_updated: String,
}

/// One tiered health recommendation.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRecommendation {
    /// Audience category: "general", "sensitive", "activities",
    /// "indoor", or "emergency"
    pub category: String,
    pub title: String,
    pub advice: String,
    /// "critical", "high", or "medium"
    pub priority: String,
}

/// Tiered health advice for the current AQI.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRecommendationsResponse {
    pub current_aqi: Option<f64>,
    pub health_risk_level: Option<HealthRisk>,
    pub recommendations: Vec<HealthRecommendation>,
    pub last_updated: String,
}

/// Comprehensive dashboard composition.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardOverviewResponse {
    #[serde(flatten)]
    pub snapshot: DashboardData,
    pub alerts: AlertBlock,
    pub monitoring_coverage: MonitoringCoverage,
}

/// Alert block embedded in the dashboard overview.
#[derive(Debug, Serialize, ToSchema)]
pub struct AlertBlock {
    pub active_alerts: usize,
    pub health_advisories: Vec<String>,
    /// "High" above AQI 300, "Moderate" above 200, else "Low"
    pub emergency_level: String,
}

/// Reporting coverage of the station network.
#[derive(Debug, Serialize, ToSchema)]
pub struct MonitoringCoverage {
    pub active_stations: usize,
    pub last_update: String,
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// Dominant source for a station, inferred from its area identifier.
fn station_primary_source(station_id: &str) -> &'static str {
    if station_id.contains("central") {
        "Vehicular"
    } else if station_id.contains("east") {
        "Industrial"
    } else if station_id.contains("west") {
        "Construction"
    } else if station_id.contains("south") {
        "Mixed"
    } else {
        "Low"
    }
}

/// Qualitative trend label for a station's current AQI level.
fn station_trend_label(aqi: f64) -> &'static str {
    if aqi > 250.0 {
        "rising"
    } else if aqi > 150.0 {
        "stable"
    } else {
        "falling"
    }
}

/// Attributed reading count for a source type in the breakdown chart.
fn source_reading_count(source_type: &str) -> u32 {
    match source_type {
        "Vehicular" => 128,
        "Industrial" => 98,
        "Construction" => 76,
        _ => 30,
    }
}

/// Derive the alert list for the current AQI and season.
fn build_alerts(aqi: f64, seasonal: &SeasonalContext, now: DateTime<Utc>) -> Vec<Alert> {
    let timestamp = now.to_rfc3339();
    let mut alerts = Vec::new();

    if aqi > 300.0 {
        alerts.push(Alert {
            id: "hazardous_aqi".to_string(),
            alert_type: "emergency".to_string(),
            severity: "critical".to_string(),
            title: "Hazardous Air Quality Alert".to_string(),
            message: format!(
                "Current AQI is {} - Hazardous conditions. Stay indoors and avoid all outdoor activities.",
                aqi
            ),
            action_required: "Immediate shelter-in-place recommended".to_string(),
            timestamp: timestamp.clone(),
        });
    } else if aqi > 200.0 {
        alerts.push(Alert {
            id: "unhealthy_aqi".to_string(),
            alert_type: "health".to_string(),
            severity: "high".to_string(),
            title: "Unhealthy Air Quality Warning".to_string(),
            message: format!(
                "Current AQI is {} - Unhealthy for everyone. Limit outdoor activities.",
                aqi
            ),
            action_required: "Avoid outdoor activities, use air purifiers".to_string(),
            timestamp: timestamp.clone(),
        });
    }

    if matches!(
        seasonal.impact_level,
        ImpactLevel::High | ImpactLevel::VeryHigh
    ) {
        alerts.push(Alert {
            id: "seasonal_alert".to_string(),
            alert_type: "seasonal".to_string(),
            severity: "medium".to_string(),
            title: format!("{} Alert", seasonal.season),
            message: seasonal.description.to_string(),
            action_required: "Monitor air quality more frequently".to_string(),
            timestamp: timestamp.clone(),
        });
    }

    if aqi > 150.0 {
        alerts.push(Alert {
            id: "source_alert".to_string(),
            alert_type: "source".to_string(),
            severity: "medium".to_string(),
            title: "High Pollution Source Activity".to_string(),
            message: "Multiple pollution sources detected. Industrial and vehicular emissions are elevated."
                .to_string(),
            action_required: "Check source analysis for detailed information".to_string(),
            timestamp,
        });
    }

    alerts
}

/// Derive the tiered recommendation list for an AQI value.
fn build_health_recommendations(aqi: f64) -> Vec<HealthRecommendation> {
    let impact = health_impact::classify(aqi);
    let mut recommendations = vec![HealthRecommendation {
        category: "general".to_string(),
        title: "General Public".to_string(),
        advice: impact.recommendation.to_string(),
        priority: if aqi > 200.0 { "high" } else { "medium" }.to_string(),
    }];

    if aqi > 100.0 {
        recommendations.push(HealthRecommendation {
            category: "sensitive".to_string(),
            title: "Sensitive Groups".to_string(),
            advice: "Children, elderly, and people with respiratory conditions should avoid outdoor activities"
                .to_string(),
            priority: "high".to_string(),
        });
    }

    if aqi > 150.0 {
        recommendations.push(HealthRecommendation {
            category: "activities".to_string(),
            title: "Outdoor Activities".to_string(),
            advice: "Postpone outdoor exercise and sports activities".to_string(),
            priority: "medium".to_string(),
        });
    }

    if aqi > 200.0 {
        recommendations.push(HealthRecommendation {
            category: "indoor".to_string(),
            title: "Indoor Air Quality".to_string(),
            advice: "Use air purifiers, close windows, and limit indoor cooking".to_string(),
            priority: "high".to_string(),
        });
    }

    if aqi > 300.0 {
        recommendations.push(HealthRecommendation {
            category: "emergency".to_string(),
            title: "Emergency Contacts".to_string(),
            advice: "Contact emergency services if experiencing severe respiratory distress"
                .to_string(),
            priority: "critical".to_string(),
        });
    }

    recommendations
}

fn emergency_level(aqi: f64) -> &'static str {
    if aqi > 300.0 {
        "High"
    } else if aqi > 200.0 {
        "Moderate"
    } else {
        "Low"
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Get the current network AQI with health, trend, and seasonal context.
#[utoipa::path(
    get,
    path = "/api/v1/overview/current-aqi",
    tag = "Overview",
    params(TrendWindowQuery),
    responses(
        (status = 200, description = "Current AQI with derived context", body = CurrentAqiResponse),
        (status = 400, description = "Invalid window parameter", body = crate::errors::ErrorResponse),
        (status = 404, description = "No readings available", body = crate::errors::ErrorResponse),
    )
)]
pub async fn current_aqi(
    State(store): State<FixtureStore>,
    Query(query): Query<TrendWindowQuery>,
) -> Result<Json<CurrentAqiResponse>, AppError> {
    let window = resolve_window(&query)?;
    let readings = store.readings()?;
    let sources = store.pollution_sources()?;

    let snapshot = build_dashboard(&readings, &sources, window, Utc::now())?;

    Ok(Json(CurrentAqiResponse {
        current_aqi: snapshot.current_aqi,
        category: snapshot.health.category,
        primary_pollutant: snapshot.primary_pollutant,
        health_advisory: snapshot.health.recommendation.to_string(),
        health_risk: snapshot.health.health_risk,
        color: snapshot.health.color.to_string(),
        trend: snapshot.trend,
        seasonal_context: snapshot.seasonal_context,
        pollutants: snapshot.pollutants,
        weather: snapshot.weather,
        last_updated: snapshot.timestamp,
        station: snapshot.station,
    }))
}

/// Get the per-station status table.
#[utoipa::path(
    get,
    path = "/api/v1/overview/stations",
    tag = "Overview",
    responses(
        (status = 200, description = "Status line per reporting station", body = Vec<StationStatus>),
    )
)]
pub async fn stations(
    State(store): State<FixtureStore>,
) -> Result<Json<Vec<StationStatus>>, AppError> {
    let readings = store.readings()?;

    let stations = readings
        .iter()
        .map(|r| StationStatus {
            name: station_display_name(&r.station_id),
            aqi: r.aqi,
            primary_source: station_primary_source(&r.station_id).to_string(),
            trend: station_trend_label(r.aqi).to_string(),
        })
        .collect();

    Ok(Json(stations))
}

/// Get source contributions with attributed reading counts.
#[utoipa::path(
    get,
    path = "/api/v1/overview/source-breakdown",
    tag = "Overview",
    responses(
        (status = 200, description = "Source contribution slices", body = Vec<SourceBreakdownEntry>),
    )
)]
pub async fn source_breakdown(
    State(store): State<FixtureStore>,
) -> Result<Json<Vec<SourceBreakdownEntry>>, AppError> {
    let sources = store.pollution_sources()?;

    let entries = sources
        .iter()
        .map(|s| SourceBreakdownEntry {
            name: s.source_type.clone(),
            value: s.contribution_percent,
            readings: source_reading_count(&s.source_type),
        })
        .collect();

    Ok(Json(entries))
}

/// Get source contributions with display colors for the pie chart.
#[utoipa::path(
    get,
    path = "/api/v1/overview/source-distribution",
    tag = "Overview",
    responses(
        (status = 200, description = "Colored source contribution slices", body = Vec<SourceDistributionEntry>),
    )
)]
pub async fn source_distribution(
    State(store): State<FixtureStore>,
) -> Result<Json<Vec<SourceDistributionEntry>>, AppError> {
    let sources = store.pollution_sources()?;

    let entries = sources
        .iter()
        .map(|s| SourceDistributionEntry {
            name: s.source_type.clone(),
            value: s.contribution_percent,
            color: source_color(&s.source_type).to_string(),
        })
        .collect();

    Ok(Json(entries))
}

/// Get the comprehensive dashboard overview.
///
/// Composes the full aggregator snapshot with the derived alert block
/// and network coverage figures.
#[utoipa::path(
    get,
    path = "/api/v1/overview/dashboard",
    tag = "Overview",
    responses(
        (status = 200, description = "Full dashboard composition", body = DashboardOverviewResponse),
        (status = 404, description = "No readings available", body = crate::errors::ErrorResponse),
    )
)]
pub async fn dashboard_overview(
    State(store): State<FixtureStore>,
) -> Result<Json<DashboardOverviewResponse>, AppError> {
    let readings = store.readings()?;
    let sources = store.pollution_sources()?;
    let now = Utc::now();

    let snapshot = build_dashboard(&readings, &sources, DEFAULT_WINDOW, now)?;
    let alerts = build_alerts(snapshot.current_aqi, &snapshot.seasonal_context, now);

    Ok(Json(DashboardOverviewResponse {
        alerts: AlertBlock {
            active_alerts: alerts.len(),
            health_advisories: vec![snapshot.health.recommendation.to_string()],
            emergency_level: emergency_level(snapshot.current_aqi).to_string(),
        },
        monitoring_coverage: MonitoringCoverage {
            active_stations: snapshot.active_stations,
            last_update: now.to_rfc3339(),
        },
        snapshot,
    }))
}

/// Get alerts derived from the current conditions.
///
/// An empty readings fixture yields an empty alert feed, not an error.
#[utoipa::path(
    get,
    path = "/api/v1/overview/alerts",
    tag = "Overview",
    responses(
        (status = 200, description = "Derived alert feed", body = AlertsResponse),
    )
)]
pub async fn real_time_alerts(
    State(store): State<FixtureStore>,
) -> Result<Json<AlertsResponse>, AppError> {
    let readings = store.readings()?;
    let now = Utc::now();

    let alerts = match readings.first() {
        Some(current) => build_alerts(current.aqi, &seasonal::resolve_at(now), now),
        None => Vec::new(),
    };

    Ok(Json(AlertsResponse {
        alert_count: alerts.len(),
        highest_severity: alerts
            .first()
            .map(|a| a.severity.clone())
            .unwrap_or_else(|| "none".to_string()),
        alerts,
        last_updated: now.to_rfc3339(),
    }))
}

/// Get tiered health recommendations for the current AQI.
#[utoipa::path(
    get,
    path = "/api/v1/overview/health-recommendations",
    tag = "Overview",
    responses(
        (status = 200, description = "Tiered health advice", body = HealthRecommendationsResponse),
    )
)]
pub async fn health_recommendations(
    State(store): State<FixtureStore>,
) -> Result<Json<HealthRecommendationsResponse>, AppError> {
    let readings = store.readings()?;
    let now = Utc::now();

    let response = match readings.first() {
        Some(current) => HealthRecommendationsResponse {
            current_aqi: Some(current.aqi),
            health_risk_level: Some(health_impact::classify(current.aqi).health_risk),
            recommendations: build_health_recommendations(current.aqi),
            last_updated: now.to_rfc3339(),
        },
        None => HealthRecommendationsResponse {
            current_aqi: None,
            health_risk_level: None,
            recommendations: Vec::new(),
            last_updated: now.to_rfc3339(),
        },
    };

    Ok(Json(response))
}
