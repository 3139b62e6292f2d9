//! CSV-backed fixture store.
//!
//! The monitoring fixtures are small, read-only CSV files that are
//! re-read on every request — there is deliberately no cache, so each
//! response reflects whatever is on disk at that moment and no request
//! ever observes partially-updated state from another.
//!
//! A missing fixture file is not an error: the store logs a warning and
//! returns an empty collection, matching how the dashboard behaves when
//! a feed has not been provisioned yet. Malformed rows, by contrast,
//! are surfaced as [`DataError`] so broken fixtures fail loudly.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::models::{ForecastRow, Policy, PollutionSource, Reading};

/// Fixture file names under the data directory.
const AQI_READINGS_FILE: &str = "aqi_readings.csv";
const POLLUTION_SOURCES_FILE: &str = "pollution_sources.csv";
const FORECASTS_FILE: &str = "forecasts.csv";
const POLICIES_FILE: &str = "policies.csv";

/// Errors raised while reading fixture data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error reading fixture '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed row in fixture '{file}': {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

/// Handle on the fixture data directory.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    data_dir: PathBuf,
}

impl FixtureStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Whether the data directory exists and is readable.
    pub fn is_reachable(&self) -> bool {
        self.data_dir.is_dir()
    }

    /// Station readings, most-recent-first (fixture row order).
    pub fn readings(&self) -> Result<Vec<Reading>, DataError> {
        self.read_fixture(AQI_READINGS_FILE)
    }

    /// Pollution source attribution rows.
    pub fn pollution_sources(&self) -> Result<Vec<PollutionSource>, DataError> {
        self.read_fixture(POLLUTION_SOURCES_FILE)
    }

    /// Daily AQI forecast rows, ordered by day offset from today.
    pub fn forecasts(&self) -> Result<Vec<ForecastRow>, DataError> {
        self.read_fixture(FORECASTS_FILE)
    }

    /// Intervention policy rows.
    pub fn policies(&self) -> Result<Vec<Policy>, DataError> {
        self.read_fixture(POLICIES_FILE)
    }

    fn read_fixture<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, DataError> {
        let path = self.data_dir.join(file);
        let reader = match std::fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Fixture file {} not found, treating as empty", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DataError::Io {
                    file: file.to_string(),
                    source: e,
                })
            }
        };
        parse_rows(reader, file)
    }
}

/// Deserialize typed rows from any CSV source with a header line.
///
/// Factored out of [`FixtureStore`] so fixture parsing can be tested
/// against in-memory strings without touching the filesystem.
pub fn parse_rows<T: DeserializeOwned, R: Read>(
    reader: R,
    file: &str,
) -> Result<Vec<T>, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: T = result.map_err(|e| DataError::Csv {
            file: file.to_string(),
            source: e,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_readings_full_row() {
        let csv = "station_id,aqi,pm25,pm10,so2,no2,co,o3,temperature,humidity,wind_speed,wind_direction,pressure,primary_pollutant,location\n\
                   anand_vihar,318,142.5,265.0,18.2,52.1,3.4,28.0,14.2,68,4.1,NW,1015,PM2.5,East Delhi\n";
        let rows: Vec<Reading> = parse_rows(csv.as_bytes(), "aqi_readings.csv").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].station_id, "anand_vihar");
        assert_eq!(rows[0].aqi, 318.0);
        assert_eq!(rows[0].pm25(), 142.5);
        assert_eq!(rows[0].location(), "East Delhi");
    }

    #[test]
    fn test_parse_readings_minimal_columns_use_fallbacks() {
        let csv = "station_id,aqi\ncentral_delhi,95\n";
        let rows: Vec<Reading> = parse_rows(csv.as_bytes(), "aqi_readings.csv").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].aqi, 95.0);
        assert!((rows[0].pm25() - 38.0).abs() < 1e-10);
        assert_eq!(rows[0].wind_direction(), "NW");
    }

    #[test]
    fn test_parse_readings_preserves_fixture_order() {
        let csv = "station_id,aqi\na,300\nb,200\nc,100\n";
        let rows: Vec<Reading> = parse_rows(csv.as_bytes(), "aqi_readings.csv").unwrap();
        let aqis: Vec<f64> = rows.iter().map(|r| r.aqi).collect();
        assert_eq!(aqis, vec![300.0, 200.0, 100.0]);
    }

    #[test]
    fn test_parse_malformed_aqi_is_an_error() {
        let csv = "station_id,aqi\ncentral_delhi,not-a-number\n";
        let result: Result<Vec<Reading>, _> = parse_rows(csv.as_bytes(), "aqi_readings.csv");
        assert!(matches!(result, Err(DataError::Csv { .. })));
    }

    #[test]
    fn test_parse_sources_with_optional_columns() {
        let csv = "id,source_type,location,contribution_percent,pollutants,confidence\n\
                   1,Vehicular,ITO Junction,32.5,\"PM2.5,NO2,CO\",0.92\n\
                   2,Dust,Various,8.0,PM10,\n";
        let rows: Vec<PollutionSource> =
            parse_rows(csv.as_bytes(), "pollution_sources.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].confidence(), 0.92);
        assert_eq!(rows[0].pollutant_list().len(), 3);
        // Empty confidence cell falls back to the default
        assert_eq!(rows[1].confidence(), 0.8);
    }

    #[test]
    fn test_parse_policies_with_blank_scores() {
        let csv = "name,policy_type,start_date,status,areas_covered,effectiveness_score,aqi_reduction\n\
                   Odd-Even Scheme,Traffic,2024-11-01,Active,Central Delhi,7.2,15\n\
                   Green Corridors,Infrastructure,2025-01-15,Planned,NCR-wide,,\n";
        let rows: Vec<Policy> = parse_rows(csv.as_bytes(), "policies.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].effectiveness_score, Some(7.2));
        assert_eq!(rows[1].effectiveness_score, None);
        assert_eq!(rows[1].aqi_reduction, None);
    }

    #[test]
    fn test_shipped_fixtures_parse() {
        let store = FixtureStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        assert!(store.is_reachable());
        assert!(!store.readings().unwrap().is_empty());
        assert!(!store.pollution_sources().unwrap().is_empty());
        assert!(!store.forecasts().unwrap().is_empty());
        assert!(!store.policies().unwrap().is_empty());
    }

    #[test]
    fn test_missing_fixture_file_is_empty_not_error() {
        let store = FixtureStore::new("/nonexistent/fixture/dir");
        let readings = store.readings().unwrap();
        assert!(readings.is_empty());
    }
}
