//! Policy dashboard HTTP endpoints.
//!
//! - GET /api/v1/policies
//! - GET /api/v1/policies/effectiveness
//! - GET /api/v1/policies/metrics

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::models::Policy;
use crate::data::store::FixtureStore;
use crate::errors::AppError;
use crate::helpers::round_1dp;

/// One intervention policy.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolicyResponse {
    pub name: String,
    #[serde(rename = "type")]
    pub policy_type: String,
    /// Policy start date (ISO 8601 date)
    pub start_date: String,
    /// "Active", "Completed", or "Planned"
    pub status: String,
    pub areas_covered: String,
    /// Effectiveness score out of 10; null for unevaluated policies
    pub effectiveness: Option<f64>,
    /// Measured AQI reduction attributed to the policy
    pub aqi_reduction: Option<f64>,
}

impl From<&Policy> for PolicyResponse {
    fn from(p: &Policy) -> Self {
        Self {
            name: p.name.clone(),
            policy_type: p.policy_type.clone(),
            start_date: p.start_date.clone(),
            status: p.status.clone(),
            areas_covered: p.areas_covered.clone(),
            effectiveness: p.effectiveness_score,
            aqi_reduction: p.aqi_reduction,
        }
    }
}

/// Effectiveness chart entry for one evaluated policy.
#[derive(Debug, Serialize, ToSchema)]
pub struct EffectivenessEntry {
    pub name: String,
    /// Effectiveness score out of 10
    pub effectiveness: f64,
    /// Measured AQI reduction; 0 when not yet quantified
    pub reduction: f64,
}

/// Aggregate metrics over the policy fixture, computed per request.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolicyMetrics {
    pub active_policies: usize,
    /// Policies carrying an effectiveness score
    pub evaluated_policies: usize,
    /// Mean AQI reduction across evaluated policies
    pub avg_aqi_reduction: f64,
    /// Mean effectiveness score across evaluated policies
    pub avg_effectiveness: f64,
}

fn policy_metrics(policies: &[Policy]) -> PolicyMetrics {
    let active_policies = policies.iter().filter(|p| p.status == "Active").count();

    let scores: Vec<f64> = policies.iter().filter_map(|p| p.effectiveness_score).collect();
    let reductions: Vec<f64> = policies.iter().filter_map(|p| p.aqi_reduction).collect();

    let mean = |values: &[f64]| {
        if values.is_empty() {
            0.0
        } else {
            round_1dp(values.iter().sum::<f64>() / values.len() as f64)
        }
    };

    PolicyMetrics {
        active_policies,
        evaluated_policies: scores.len(),
        avg_aqi_reduction: mean(&reductions),
        avg_effectiveness: mean(&scores),
    }
}

/// List all intervention policies.
#[utoipa::path(
    get,
    path = "/api/v1/policies",
    tag = "Policies",
    responses(
        (status = 200, description = "All intervention policies", body = Vec<PolicyResponse>),
    )
)]
pub async fn list_policies(
    State(store): State<FixtureStore>,
) -> Result<Json<Vec<PolicyResponse>>, AppError> {
    let policies = store.policies()?;
    let items = policies.iter().map(PolicyResponse::from).collect();
    Ok(Json(items))
}

/// Get effectiveness data for evaluated policies only.
#[utoipa::path(
    get,
    path = "/api/v1/policies/effectiveness",
    tag = "Policies",
    responses(
        (status = 200, description = "Evaluated policies with scores", body = Vec<EffectivenessEntry>),
    )
)]
pub async fn effectiveness_data(
    State(store): State<FixtureStore>,
) -> Result<Json<Vec<EffectivenessEntry>>, AppError> {
    let policies = store.policies()?;

    let entries = policies
        .iter()
        .filter_map(|p| {
            p.effectiveness_score.map(|score| EffectivenessEntry {
                name: p.name.clone(),
                effectiveness: score,
                reduction: p.aqi_reduction.unwrap_or(0.0),
            })
        })
        .collect();

    Ok(Json(entries))
}

/// Get aggregate policy metrics.
#[utoipa::path(
    get,
    path = "/api/v1/policies/metrics",
    tag = "Policies",
    responses(
        (status = 200, description = "Aggregate policy metrics", body = PolicyMetrics),
    )
)]
pub async fn metrics(
    State(store): State<FixtureStore>,
) -> Result<Json<PolicyMetrics>, AppError> {
    let policies = store.policies()?;
    Ok(Json(policy_metrics(&policies)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(name: &str, status: &str, score: Option<f64>, reduction: Option<f64>) -> Policy {
        Policy {
            name: name.to_string(),
            policy_type: "Traffic".to_string(),
            start_date: "2024-11-01".to_string(),
            status: status.to_string(),
            areas_covered: "Central Delhi".to_string(),
            effectiveness_score: score,
            aqi_reduction: reduction,
        }
    }

    #[test]
    fn test_metrics_computed_from_evaluated_policies() {
        let policies = vec![
            policy("Odd-Even Scheme", "Active", Some(8.0), Some(15.0)),
            policy("Industrial Controls", "Active", Some(6.0), Some(25.0)),
            policy("Green Corridors", "Planned", None, None),
        ];
        let m = policy_metrics(&policies);
        assert_eq!(m.active_policies, 2);
        assert_eq!(m.evaluated_policies, 2);
        assert_eq!(m.avg_effectiveness, 7.0);
        assert_eq!(m.avg_aqi_reduction, 20.0);
    }

    #[test]
    fn test_metrics_empty_fixture() {
        let m = policy_metrics(&[]);
        assert_eq!(m.active_policies, 0);
        assert_eq!(m.evaluated_policies, 0);
        assert_eq!(m.avg_effectiveness, 0.0);
        assert_eq!(m.avg_aqi_reduction, 0.0);
    }

    #[test]
    fn test_metrics_rounds_to_one_decimal() {
        let policies = vec![
            policy("A", "Active", Some(7.0), Some(10.0)),
            policy("B", "Active", Some(8.0), Some(11.0)),
            policy("C", "Completed", Some(8.5), Some(12.0)),
        ];
        let m = policy_metrics(&policies);
        assert_eq!(m.avg_effectiveness, 7.8);
        assert_eq!(m.avg_aqi_reduction, 11.0);
    }

    #[test]
    fn test_policy_response_preserves_missing_scores() {
        let p = policy("Green Corridors", "Planned", None, None);
        let response = PolicyResponse::from(&p);
        assert_eq!(response.effectiveness, None);
        assert_eq!(response.aqi_reduction, None);
    }
}
