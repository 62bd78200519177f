use serde::{Deserialize, Serialize};

/// One heart rate zone as configured on the athlete profile.
///
/// `max` of -1 (or null) marks the open-ended top zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZoneRange {
  pub min: f64,
  #[serde(default)]
  pub max: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

impl HeartRateZoneRange {
  pub fn new(min: f64, max: f64) -> Self {
    Self {
      min,
      max: Some(max),
      name: None,
    }
  }

  pub fn open_ended(min: f64) -> Self {
    Self {
      min,
      max: None,
      name: None,
    }
  }

  /// Upper bound in bpm, None when the zone has no ceiling.
  pub fn upper_bound(&self) -> Option<f64> {
    self.max.filter(|max| *max >= 0.0)
  }

  /// Inclusive on both ends.
  pub fn contains(&self, hr: f64) -> bool {
    hr >= self.min && self.upper_bound().map_or(true, |max| hr <= max)
  }
}

/// Athlete heart rate zones, ordered by ascending intensity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZones {
  #[serde(default)]
  pub custom_zones: bool,
  #[serde(default)]
  pub zones: Vec<HeartRateZoneRange>,
}

impl HeartRateZones {
  pub fn new(zones: Vec<HeartRateZoneRange>) -> Self {
    Self {
      custom_zones: false,
      zones,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.zones.is_empty()
  }

  /// Index of the first zone containing `hr`. Earlier zones win on shared
  /// boundaries.
  pub fn zone_index(&self, hr: f64) -> Option<usize> {
    self.zones.iter().position(|zone| zone.contains(hr))
  }
}

/// Response body of the athlete zones endpoint. Only the HR part is used.
#[derive(Debug, Clone, Deserialize)]
pub struct AthleteZonesResponse {
  #[serde(default)]
  pub heart_rate: Option<HeartRateZones>,
}
