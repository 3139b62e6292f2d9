//! Seasonal pollution context for Delhi-NCR.
//!
//! The region's air quality follows a fixed annual pattern: stubble
//! burning from mid-October, winter temperature inversion, pre-monsoon
//! dust storms, and a comparatively clean monsoon. The resolver maps a
//! calendar date onto that profile; it depends on nothing but the
//! (month, day) pair.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Day of month from which the October/November stubble window applies.
const STUBBLE_SEASON_START_DAY: u32 = 15;

/// Severity of the seasonal contribution to pollution levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ImpactLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

/// Seasonal profile for a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SeasonalContext {
    /// Season name with its dominant pollution driver
    pub season: &'static str,
    /// How strongly the season drives pollution levels
    pub impact_level: ImpactLevel,
    /// Dominant pollution source for the season
    pub primary_source: &'static str,
    /// Human-readable description of the seasonal mechanism
    pub description: &'static str,
}

/// Resolve the seasonal profile for a (month, day-of-month) pair.
///
/// Rules apply in order, first match wins:
/// 1. Oct/Nov from the 15th → Post-Monsoon stubble burning
/// 2. Dec–Feb → Winter temperature inversion
/// 3. Mar–May → Summer dust storms
/// 4. otherwise → Monsoon, industrial emissions dominate
pub fn resolve(month: u32, day: u32) -> SeasonalContext {
    if matches!(month, 10 | 11) && day >= STUBBLE_SEASON_START_DAY {
        SeasonalContext {
            season: "Post-Monsoon (Stubble Burning)",
            impact_level: ImpactLevel::High,
            primary_source: "Stubble Burning",
            description: "Peak stubble burning season in Punjab-Haryana",
        }
    } else if matches!(month, 12 | 1 | 2) {
        SeasonalContext {
            season: "Winter (Temperature Inversion)",
            impact_level: ImpactLevel::VeryHigh,
            primary_source: "Temperature Inversion",
            description: "Cold weather traps pollutants near ground level",
        }
    } else if matches!(month, 3 | 4 | 5) {
        SeasonalContext {
            season: "Summer (Dust Storms)",
            impact_level: ImpactLevel::Moderate,
            primary_source: "Dust Storms",
            description: "Dust storms from Rajasthan and construction activity",
        }
    } else {
        SeasonalContext {
            season: "Monsoon (Industrial Emissions)",
            impact_level: ImpactLevel::Low,
            primary_source: "Industrial",
            description: "Rain washes away pollutants but industrial emissions persist",
        }
    }
}

/// Resolve the seasonal profile for a timestamp.
pub fn resolve_at(now: DateTime<Utc>) -> SeasonalContext {
    resolve(now.month(), now.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_late_november_is_stubble_season() {
        let ctx = resolve(11, 20);
        assert_eq!(ctx.season, "Post-Monsoon (Stubble Burning)");
        assert_eq!(ctx.impact_level, ImpactLevel::High);
        assert_eq!(ctx.primary_source, "Stubble Burning");
    }

    #[test]
    fn test_early_november_is_still_monsoon_profile() {
        let ctx = resolve(11, 10);
        assert_eq!(ctx.season, "Monsoon (Industrial Emissions)");
        assert_eq!(ctx.impact_level, ImpactLevel::Low);
        assert_eq!(ctx.primary_source, "Industrial");
    }

    #[test]
    fn test_stubble_window_starts_on_the_15th() {
        assert_eq!(resolve(10, 15).primary_source, "Stubble Burning");
        assert_eq!(resolve(10, 14).primary_source, "Industrial");
    }

    #[test]
    fn test_winter_months() {
        for month in [12, 1, 2] {
            let ctx = resolve(month, 1);
            assert_eq!(ctx.season, "Winter (Temperature Inversion)");
            assert_eq!(ctx.impact_level, ImpactLevel::VeryHigh);
        }
    }

    #[test]
    fn test_summer_months() {
        for month in [3, 4, 5] {
            let ctx = resolve(month, 20);
            assert_eq!(ctx.season, "Summer (Dust Storms)");
            assert_eq!(ctx.impact_level, ImpactLevel::Moderate);
        }
    }

    #[test]
    fn test_monsoon_months() {
        for month in [6, 7, 8, 9] {
            let ctx = resolve(month, 10);
            assert_eq!(ctx.season, "Monsoon (Industrial Emissions)");
        }
    }

    #[test]
    fn test_stubble_rule_beats_winter_rule_ordering() {
        // December is winter even late in the month; the stubble rule
        // only covers October and November.
        assert_eq!(resolve(12, 20).primary_source, "Temperature Inversion");
    }

    #[test]
    fn test_resolve_at_uses_calendar_date() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 8, 30, 0).unwrap();
        let ctx = resolve_at(ts);
        assert_eq!(ctx.impact_level, ImpactLevel::VeryHigh);
    }

    #[test]
    fn test_impact_level_serializes_with_display_labels() {
        let json = serde_json::to_string(&ImpactLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"Very High\"");
        let json = serde_json::to_string(&ImpactLevel::Low).unwrap();
        assert_eq!(json, "\"Low\"");
    }
}
