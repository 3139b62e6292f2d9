//! Typed records for the CSV fixture files.
//!
//! Fixture rows arrive as loosely-shaped CSV; deserializing into these
//! structs catches missing or malformed required fields at the read
//! boundary instead of at arbitrary use sites. Optional columns carry
//! the network's documented fallback values, exposed via accessor
//! methods so callers never see a bare `Option` for them.

use serde::Deserialize;

/// One station measurement row from `aqi_readings.csv`.
///
/// Rows are ordered most-recent-first; the first row is the "current"
/// reading for the network.
#[derive(Debug, Clone, Deserialize)]
pub struct Reading {
    pub station_id: String,
    pub aqi: f64,
    #[serde(default)]
    pub pm25: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub so2: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<String>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub primary_pollutant: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Reading {
    /// PM2.5 concentration; estimated from AQI when the column is absent.
    pub fn pm25(&self) -> f64 {
        self.pm25.unwrap_or(self.aqi / 2.5)
    }

    /// PM10 concentration; estimated from AQI when the column is absent.
    pub fn pm10(&self) -> f64 {
        self.pm10.unwrap_or(self.aqi / 1.2)
    }

    pub fn so2(&self) -> f64 {
        self.so2.unwrap_or(15.0)
    }

    pub fn no2(&self) -> f64 {
        self.no2.unwrap_or(25.0)
    }

    pub fn co(&self) -> f64 {
        self.co.unwrap_or(3.0)
    }

    pub fn o3(&self) -> f64 {
        self.o3.unwrap_or(35.0)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(28.5)
    }

    pub fn humidity(&self) -> f64 {
        self.humidity.unwrap_or(45.0)
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind_speed.unwrap_or(8.2)
    }

    pub fn wind_direction(&self) -> &str {
        self.wind_direction.as_deref().unwrap_or("NW")
    }

    pub fn pressure(&self) -> f64 {
        self.pressure.unwrap_or(1013.0)
    }

    pub fn primary_pollutant(&self) -> &str {
        self.primary_pollutant.as_deref().unwrap_or("PM2.5")
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or("Delhi-NCR")
    }
}

/// One attributed pollution source row from `pollution_sources.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct PollutionSource {
    pub id: u32,
    pub source_type: String,
    pub location: String,
    pub contribution_percent: f64,
    /// Comma-separated pollutant names (e.g. "PM2.5,NO2,CO").
    pub pollutants: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub impact_level: Option<String>,
    #[serde(default)]
    pub control_measures: Option<String>,
    #[serde(default)]
    pub last_detected: Option<String>,
}

impl PollutionSource {
    /// Attribution confidence in [0, 1]; defaults to 0.8.
    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(0.8)
    }

    pub fn impact_level(&self) -> &str {
        self.impact_level.as_deref().unwrap_or("Medium")
    }

    pub fn control_measures(&self) -> &str {
        self.control_measures.as_deref().unwrap_or("General measures")
    }

    pub fn last_detected(&self) -> &str {
        self.last_detected.as_deref().unwrap_or("Recent")
    }

    /// Split the comma-separated pollutants column into a list.
    pub fn pollutant_list(&self) -> Vec<String> {
        self.pollutants
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// One daily AQI forecast row from `forecasts.csv`, ordered by day offset.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRow {
    #[serde(default)]
    pub forecast_type: Option<String>,
    pub aqi_prediction: i64,
    pub primary_pollutant: String,
    pub confidence: f64,
}

/// One intervention policy row from `policies.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct Policy {
    pub name: String,
    pub policy_type: String,
    pub start_date: String,
    pub status: String,
    pub areas_covered: String,
    /// Empty in the fixture for policies not yet evaluated.
    #[serde(default)]
    pub effectiveness_score: Option<f64>,
    #[serde(default)]
    pub aqi_reduction: Option<f64>,
}
