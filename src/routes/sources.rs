//! Source analysis HTTP endpoints.
//!
//! - GET /api/v1/sources
//! - GET /api/v1/sources/impact-distribution

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::models::PollutionSource;
use crate::data::store::FixtureStore;
use crate::errors::AppError;
use crate::helpers::{round_1dp, source_color};

/// One attributed pollution source with derived display fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct SourceDetail {
    #[serde(rename = "type")]
    pub source_type: String,
    pub location: String,
    /// "High" above 20% contribution, "Medium" otherwise
    pub impact: String,
    /// Contribution in percent
    pub contribution: f64,
    /// Attribution confidence in [0, 1]
    pub confidence: f64,
    pub impact_level: String,
    pub control_measures: String,
    pub last_detected: String,
    pub description: String,
    /// Known hotspot locations for this source type
    pub hotspots: Vec<&'static str>,
    pub pollutants: Vec<String>,
}

/// One slice of the contribution-sorted impact distribution.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImpactSlice {
    pub id: u32,
    pub name: String,
    /// Contribution in percent
    pub value: f64,
    /// Contribution rounded to one decimal place
    pub percentage: f64,
    /// "High" above 20%, "Medium" above 10%, else "Low"
    pub impact_level: String,
    /// Display color (hex)
    pub color: String,
    pub location: String,
    pub pollutants: Vec<String>,
    /// Attribution confidence as a percentage
    pub confidence: f64,
    pub control_measures: String,
    pub last_detected: String,
}

/// Summary statistics over the impact distribution.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImpactSummary {
    pub total_sources: usize,
    pub total_contribution: f64,
    pub high_impact_sources: usize,
    /// Mean attribution confidence as a percentage
    pub average_confidence: f64,
    pub dominant_source: Option<String>,
    pub last_updated: String,
}

/// Impact distribution response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImpactDistributionResponse {
    pub sources: Vec<ImpactSlice>,
    pub summary: ImpactSummary,
}

/// Known hotspot locations per source type.
fn hotspots_for_source(source_type: &str) -> Vec<&'static str> {
    match source_type {
        "Vehicular" => vec![
            "ITO Junction",
            "Delhi Gate",
            "CP Metro Station",
            "India Gate",
            "Karol Bagh",
        ],
        "Industrial" => vec![
            "Mayapuri Industrial",
            "Anand Parbat",
            "Okhla Industrial",
            "Narela Industrial",
        ],
        "Construction" => vec![
            "Dwarka Expressway",
            "Noida Construction Sites",
            "Gurgaon Highrise Projects",
        ],
        "Stubble Burning" => vec![
            "Punjab-Haryana Border",
            "Ludhiana District",
            "Karnal District",
            "Fatehabad District",
        ],
        "Power Plants" => vec![
            "NTPC Badarpur",
            "Rajghat Power Plant",
            "Indraprastha Power Station",
        ],
        "Waste Burning" => vec!["Bhalswa Landfill", "Okhla Landfill", "Ghazipur Landfill"],
        "Dust" => vec!["Various locations", "Construction sites", "Unpaved roads"],
        "Domestic" => vec!["Residential areas", "Slum clusters", "Unauthorized colonies"],
        "Biomass" => vec!["Rural areas", "Slum clusters", "Unauthorized colonies"],
        _ => vec!["Various locations"],
    }
}

/// Impact bucket for a contribution percentage.
fn impact_level(contribution: f64) -> &'static str {
    if contribution > 20.0 {
        "High"
    } else if contribution > 10.0 {
        "Medium"
    } else {
        "Low"
    }
}

fn source_detail(src: &PollutionSource) -> SourceDetail {
    SourceDetail {
        source_type: src.source_type.clone(),
        location: src.location.clone(),
        impact: if src.contribution_percent > 20.0 {
            "High"
        } else {
            "Medium"
        }
        .to_string(),
        contribution: src.contribution_percent,
        confidence: src.confidence(),
        impact_level: src.impact_level().to_string(),
        control_measures: src.control_measures().to_string(),
        last_detected: src.last_detected().to_string(),
        description: format!(
            "Contributing {}% to overall pollution levels with {:.0}% confidence",
            src.contribution_percent,
            src.confidence() * 100.0
        ),
        hotspots: hotspots_for_source(&src.source_type),
        pollutants: src.pollutant_list(),
    }
}

/// List all attributed pollution sources.
#[utoipa::path(
    get,
    path = "/api/v1/sources",
    tag = "Sources",
    responses(
        (status = 200, description = "Attributed pollution sources", body = Vec<SourceDetail>),
    )
)]
pub async fn list_sources(
    State(store): State<FixtureStore>,
) -> Result<Json<Vec<SourceDetail>>, AppError> {
    let sources = store.pollution_sources()?;
    let details = sources.iter().map(source_detail).collect();
    Ok(Json(details))
}

/// Get the contribution-sorted impact distribution with summary stats.
#[utoipa::path(
    get,
    path = "/api/v1/sources/impact-distribution",
    tag = "Sources",
    responses(
        (status = 200, description = "Impact distribution and summary", body = ImpactDistributionResponse),
    )
)]
pub async fn impact_distribution(
    State(store): State<FixtureStore>,
) -> Result<Json<ImpactDistributionResponse>, AppError> {
    let sources = store.pollution_sources()?;

    let mut slices: Vec<ImpactSlice> = sources
        .iter()
        .map(|src| ImpactSlice {
            id: src.id,
            name: src.source_type.clone(),
            value: src.contribution_percent,
            percentage: round_1dp(src.contribution_percent),
            impact_level: impact_level(src.contribution_percent).to_string(),
            color: source_color(&src.source_type).to_string(),
            location: src.location.clone(),
            pollutants: src.pollutant_list(),
            confidence: round_1dp(src.confidence() * 100.0),
            control_measures: src.control_measures().to_string(),
            last_detected: src.last_detected().to_string(),
        })
        .collect();

    // Largest contributors first
    slices.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total_contribution = round_1dp(slices.iter().map(|s| s.value).sum());
    let high_impact_sources = slices.iter().filter(|s| s.impact_level == "High").count();
    let average_confidence = if slices.is_empty() {
        0.0
    } else {
        round_1dp(slices.iter().map(|s| s.confidence).sum::<f64>() / slices.len() as f64)
    };

    let summary = ImpactSummary {
        total_sources: slices.len(),
        total_contribution,
        high_impact_sources,
        average_confidence,
        dominant_source: slices.first().map(|s| s.name.clone()),
        last_updated: Utc::now().to_rfc3339(),
    };

    Ok(Json(ImpactDistributionResponse {
        sources: slices,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: u32, source_type: &str, contribution: f64, confidence: Option<f64>) -> PollutionSource {
        PollutionSource {
            id,
            source_type: source_type.to_string(),
            location: "Delhi".to_string(),
            contribution_percent: contribution,
            pollutants: "PM2.5,NO2".to_string(),
            confidence,
            impact_level: None,
            control_measures: None,
            last_detected: None,
        }
    }

    #[test]
    fn test_impact_level_buckets() {
        assert_eq!(impact_level(25.0), "High");
        assert_eq!(impact_level(20.0), "Medium");
        assert_eq!(impact_level(10.5), "Medium");
        assert_eq!(impact_level(10.0), "Low");
        assert_eq!(impact_level(2.0), "Low");
    }

    #[test]
    fn test_hotspots_known_and_unknown_sources() {
        assert!(hotspots_for_source("Vehicular").contains(&"ITO Junction"));
        assert_eq!(hotspots_for_source("Volcanic"), vec!["Various locations"]);
    }

    #[test]
    fn test_source_detail_description_and_impact() {
        let detail = source_detail(&source(1, "Vehicular", 32.5, Some(0.92)));
        assert_eq!(detail.impact, "High");
        assert_eq!(
            detail.description,
            "Contributing 32.5% to overall pollution levels with 92% confidence"
        );
        assert_eq!(detail.pollutants, vec!["PM2.5", "NO2"]);
    }

    #[test]
    fn test_source_detail_twenty_percent_is_medium() {
        let detail = source_detail(&source(1, "Dust", 20.0, None));
        assert_eq!(detail.impact, "Medium");
    }

    #[tokio::test]
    async fn test_impact_distribution_empty_store() {
        let store = FixtureStore::new("/nonexistent/fixture/dir");
        let response = impact_distribution(State(store)).await.unwrap();
        assert!(response.0.sources.is_empty());
        assert_eq!(response.0.summary.total_sources, 0);
        assert_eq!(response.0.summary.average_confidence, 0.0);
        assert_eq!(response.0.summary.dominant_source, None);
    }
}
