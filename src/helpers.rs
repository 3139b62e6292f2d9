//! Shared formatting helpers.
//!
//! Station identifiers in the fixtures are snake_case ("anand_vihar");
//! the dashboard displays them title-cased ("Anand Vihar"). Percent and
//! score values are rounded to one decimal place for display, matching
//! the precision the rest of the payloads use.

/// Title-case a snake_case station identifier for display.
pub(crate) fn station_display_name(station_id: &str) -> String {
    station_id
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Round a value to one decimal place.
pub(crate) fn round_1dp(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Display color for a pollution source type; gray for unknown types.
pub(crate) fn source_color(source_type: &str) -> &'static str {
    match source_type {
        "Vehicular" => "#ef4444",
        "Industrial" => "#f97316",
        "Construction" => "#8b5cf6",
        "Stubble Burning" => "#06b6d4",
        "Power Plants" => "#84cc16",
        "Waste Burning" => "#ec4899",
        "Dust" => "#6b7280",
        "Domestic" => "#f59e0b",
        "Biomass" => "#10b981",
        "Other" => "#6366f1",
        _ => "#6b7280",
    }
}
