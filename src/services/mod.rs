//! Core derivation logic: classification, trend, seasonality, and the
//! dashboard aggregator that composes them.

pub mod dashboard;
pub mod health_impact;
pub mod seasonal;
pub mod trend;
