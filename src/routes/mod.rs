//! HTTP endpoint handlers, grouped by dashboard section.

pub mod forecasts;
pub mod health;
pub mod overview;
pub mod policies;
pub mod sources;
