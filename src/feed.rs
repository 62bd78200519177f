use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Activity, AthleteZonesResponse, HeartRateZones};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse activities: {0}")]
  Parse(#[from] serde_json::Error),
}

/// ---------------------------------------------------------------------------
/// Collaborator Interfaces
/// ---------------------------------------------------------------------------

/// Source of the athlete's activities (one fetch page)
pub trait ActivityFeed {
  fn fetch_activities(&self) -> Result<Vec<Activity>, FeedError>;
}

/// Source of the athlete's heart rate zones
pub trait ZoneConfigProvider {
  fn fetch_zones(&self) -> ZoneLookup;
}

/// Outcome of a zone lookup. Classification treats `Unavailable` exactly
/// like "no zones"; the reason is only for messaging.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneLookup {
  Available(HeartRateZones),
  Unavailable(String),
}

impl ZoneLookup {
  pub fn zones(&self) -> Option<&HeartRateZones> {
    match self {
      ZoneLookup::Available(zones) => Some(zones),
      ZoneLookup::Unavailable(_) => None,
    }
  }

  pub fn is_available(&self) -> bool {
    matches!(self, ZoneLookup::Available(_))
  }

  fn unavailable(reason: impl Into<String>) -> Self {
    let reason = reason.into();
    log::warn!("Athlete HR zones unavailable: {}", reason);
    ZoneLookup::Unavailable(reason)
  }
}

/// ---------------------------------------------------------------------------
/// JSON Dump Sources
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum JsonSource {
  File(PathBuf),
  Inline(String),
}

impl JsonSource {
  fn read(&self) -> Result<String, FeedError> {
    match self {
      JsonSource::File(path) => fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.clone(),
        source,
      }),
      JsonSource::Inline(body) => Ok(body.clone()),
    }
  }
}

/// Activities from a saved `/athlete/activities` response (JSON array)
#[derive(Debug, Clone)]
pub struct JsonActivityFeed {
  source: JsonSource,
}

impl JsonActivityFeed {
  pub fn from_path(path: impl AsRef<Path>) -> Self {
    Self {
      source: JsonSource::File(path.as_ref().to_path_buf()),
    }
  }

  pub fn from_json(body: impl Into<String>) -> Self {
    Self {
      source: JsonSource::Inline(body.into()),
    }
  }
}

impl ActivityFeed for JsonActivityFeed {
  fn fetch_activities(&self) -> Result<Vec<Activity>, FeedError> {
    let body = self.source.read()?;
    let activities = parse_activities(&body)?;
    log::info!("Loaded {} activities", activities.len());
    Ok(activities)
  }
}

pub fn parse_activities(body: &str) -> Result<Vec<Activity>, FeedError> {
  Ok(serde_json::from_str(body)?)
}

/// Zones from a saved `/athlete/zones` response
#[derive(Debug, Clone)]
pub struct JsonZoneProvider {
  source: Option<JsonSource>,
}

impl JsonZoneProvider {
  pub fn from_path(path: impl AsRef<Path>) -> Self {
    Self {
      source: Some(JsonSource::File(path.as_ref().to_path_buf())),
    }
  }

  pub fn from_json(body: impl Into<String>) -> Self {
    Self {
      source: Some(JsonSource::Inline(body.into())),
    }
  }

  /// Provider for setups without a zones dump
  pub fn none() -> Self {
    Self { source: None }
  }
}

impl ZoneConfigProvider for JsonZoneProvider {
  fn fetch_zones(&self) -> ZoneLookup {
    let Some(source) = &self.source else {
      return ZoneLookup::Unavailable("not configured".to_string());
    };

    let body = match source.read() {
      Ok(body) => body,
      Err(e) => return ZoneLookup::unavailable(e.to_string()),
    };

    parse_zones(&body)
  }
}

/// Interpret an athlete zones response body
pub fn parse_zones(body: &str) -> ZoneLookup {
  let response: AthleteZonesResponse = match serde_json::from_str(body) {
    Ok(response) => response,
    Err(e) => return ZoneLookup::unavailable(format!("unexpected zones format: {}", e)),
  };

  match response.heart_rate {
    Some(zones) if !zones.is_empty() => ZoneLookup::Available(zones),
    Some(_) => ZoneLookup::unavailable("no heart rate zones configured"),
    None => ZoneLookup::unavailable("response has no heart_rate section"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  const ACTIVITIES_JSON: &str = r#"[
    {
      "id": 11,
      "name": "Morning Run",
      "distance": 8012.3,
      "moving_time": 2700,
      "elapsed_time": 2810,
      "type": "Run",
      "sport_type": "Run",
      "start_date": "2024-05-06T05:00:00Z",
      "start_date_local": "2024-05-06T07:00:00Z",
      "timezone": "(GMT+01:00) Europe/Paris",
      "map": {"id": "a11", "summary_polyline": null, "resource_state": 2},
      "average_speed": 2.967,
      "max_speed": 4.2,
      "has_heartrate": true,
      "average_heartrate": 139.4
    },
    {
      "id": 12,
      "name": "Yoga",
      "moving_time": 1800,
      "type": "Yoga",
      "start_date_local": "2024-05-07T18:00:00Z"
    }
  ]"#;

  const ZONES_JSON: &str = r#"{
    "heart_rate": {
      "custom_zones": false,
      "zones": [
        {"min": 0, "max": 129},
        {"min": 129, "max": 160},
        {"min": 160, "max": 176},
        {"min": 176, "max": 192},
        {"min": 192, "max": -1}
      ]
    }
  }"#;

  #[test]
  fn test_inline_activity_feed() {
    let activities = JsonActivityFeed::from_json(ACTIVITIES_JSON)
      .fetch_activities()
      .unwrap();

    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].average_heartrate, Some(139.4));
    assert_eq!(activities[1].distance, 0.0);
    assert!(!activities[1].has_heartrate);
  }

  #[test]
  fn test_file_activity_feed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ACTIVITIES_JSON.as_bytes()).unwrap();

    let activities = JsonActivityFeed::from_path(file.path())
      .fetch_activities()
      .unwrap();
    assert_eq!(activities.len(), 2);
  }

  #[test]
  fn test_missing_activity_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = JsonActivityFeed::from_path(dir.path().join("missing.json")).fetch_activities();
    assert!(matches!(result, Err(FeedError::Io { .. })));
  }

  #[test]
  fn test_malformed_activities_is_parse_error() {
    let result = JsonActivityFeed::from_json(r#"{"message": "Authorization Error"}"#).fetch_activities();
    assert!(matches!(result, Err(FeedError::Parse(_))));
  }

  #[test]
  fn test_zone_provider_available() {
    let lookup = JsonZoneProvider::from_json(ZONES_JSON).fetch_zones();
    assert!(lookup.is_available());
    assert_eq!(lookup.zones().unwrap().zones.len(), 5);
  }

  #[test]
  fn test_zone_provider_unavailable_cases() {
    let cases = [
      JsonZoneProvider::none(),
      JsonZoneProvider::from_json(r#"{"heart_rate": {"custom_zones": false, "zones": []}}"#),
      JsonZoneProvider::from_json(r#"{"power": {"zones": []}}"#),
      JsonZoneProvider::from_json("Forbidden"),
      JsonZoneProvider::from_path("/nonexistent/zones.json"),
    ];

    for provider in cases {
      let lookup = provider.fetch_zones();
      assert!(!lookup.is_available(), "expected unavailable: {:?}", lookup);
      assert!(lookup.zones().is_none());
    }
  }

  #[test]
  fn test_zone_file_provider() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ZONES_JSON.as_bytes()).unwrap();

    let lookup = JsonZoneProvider::from_path(file.path()).fetch_zones();
    assert_eq!(lookup.zones().unwrap().zones[4].upper_bound(), None);
  }
}
