//! AQI health-impact classification.
//!
//! Maps a numeric AQI value onto the six-band health scale used across
//! the dashboard: category, display color, risk level, and a public
//! advisory. Bands have inclusive upper bounds, so 50 is Good and 51 is
//! Moderate. Every finite input lands in exactly one band; negative
//! values classify as Good.

use serde::Serialize;
use utoipa::ToSchema;

/// Health category for an AQI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum AqiCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

/// Population-level health risk for an AQI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum HealthRisk {
    Minimal,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Severe,
}

/// Derived health impact for one AQI value.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthImpact {
    /// Health category label
    pub category: AqiCategory,
    /// Display color for the band (hex)
    pub color: &'static str,
    /// Risk level for the general population
    pub health_risk: HealthRisk,
    /// Public health advisory text
    pub recommendation: &'static str,
}

/// Classify an AQI value into its health band.
///
/// First matching inclusive upper bound wins; anything above 300 is
/// Hazardous.
pub fn classify(aqi: f64) -> HealthImpact {
    if aqi <= 50.0 {
        HealthImpact {
            category: AqiCategory::Good,
            color: "#00e400",
            health_risk: HealthRisk::Minimal,
            recommendation: "Enjoy outdoor activities",
        }
    } else if aqi <= 100.0 {
        HealthImpact {
            category: AqiCategory::Moderate,
            color: "#ffff00",
            health_risk: HealthRisk::Low,
            recommendation: "Sensitive groups should limit outdoor activities",
        }
    } else if aqi <= 150.0 {
        HealthImpact {
            category: AqiCategory::UnhealthyForSensitiveGroups,
            color: "#ff7e00",
            health_risk: HealthRisk::Moderate,
            recommendation: "Children and elderly should avoid outdoor activities",
        }
    } else if aqi <= 200.0 {
        HealthImpact {
            category: AqiCategory::Unhealthy,
            color: "#ff0000",
            health_risk: HealthRisk::High,
            recommendation: "Everyone should avoid outdoor activities",
        }
    } else if aqi <= 300.0 {
        HealthImpact {
            category: AqiCategory::VeryUnhealthy,
            color: "#8f3f97",
            health_risk: HealthRisk::VeryHigh,
            recommendation: "Stay indoors, use air purifiers",
        }
    } else {
        HealthImpact {
            category: AqiCategory::Hazardous,
            color: "#7e0023",
            health_risk: HealthRisk::Severe,
            recommendation: "Emergency conditions - avoid all outdoor activities",
        }
    }
}
