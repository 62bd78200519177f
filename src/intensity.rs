//! Intensity classification for single activities
//!
//! Labels an activity Easy, Hard or Unlabeled from its average heart rate,
//! using the athlete's zones when available and a fixed bpm threshold
//! otherwise. The provenance of every label is kept alongside it.

use serde::{Deserialize, Serialize};

use crate::models::{Activity, HeartRateZones};

/// Highest average HR still counted as easy when no zones apply.
pub const DEFAULT_EASY_MAX_HR: f64 = 145.0;

/// Zones 1 and 2 are easy, zone 3 and up are hard.
pub const DEFAULT_EASY_ZONE_COUNT: usize = 2;

/// ---------------------------------------------------------------------------
/// Labels
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
  Easy,
  Hard,
  #[serde(rename = "N/A")]
  Unlabeled,
}

impl Intensity {
  pub fn as_str(&self) -> &'static str {
    match self {
      Intensity::Easy => "Easy",
      Intensity::Hard => "Hard",
      Intensity::Unlabeled => "N/A",
    }
  }
}

impl std::fmt::Display for Intensity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Which rule produced an intensity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntensitySource {
  #[serde(rename = "HR (Zones)")]
  ZoneBased,
  #[serde(rename = "HR (Fixed Threshold)")]
  FixedThreshold,
  #[serde(rename = "N/A (No HR)")]
  NoHeartRate,
}

impl IntensitySource {
  pub fn as_str(&self) -> &'static str {
    match self {
      IntensitySource::ZoneBased => "HR (Zones)",
      IntensitySource::FixedThreshold => "HR (Fixed Threshold)",
      IntensitySource::NoHeartRate => "N/A (No HR)",
    }
  }
}

impl std::fmt::Display for IntensitySource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An activity together with its intensity label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedActivity {
  #[serde(flatten)]
  pub activity: Activity,
  pub intensity: Intensity,
  pub intensity_source: IntensitySource,
  /// Matched zone (0-based), only set for zone-based labels
  #[serde(skip_serializing_if = "Option::is_none")]
  pub zone_index: Option<usize>,
}

/// ---------------------------------------------------------------------------
/// Rules
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRules {
  /// Fixed threshold: avg HR at or below this is easy
  pub easy_max_hr: f64,
  /// Number of lowest zones that count as easy
  pub easy_zone_count: usize,
}

impl Default for ClassificationRules {
  fn default() -> Self {
    Self {
      easy_max_hr: DEFAULT_EASY_MAX_HR,
      easy_zone_count: DEFAULT_EASY_ZONE_COUNT,
    }
  }
}

impl ClassificationRules {
  /// Classify one activity. Never fails.
  ///
  /// Order of precedence:
  /// 1. no usable HR -> Unlabeled
  /// 2. first zone containing the avg HR -> Easy for the lowest
  ///    `easy_zone_count` zones, Hard above
  /// 3. fixed threshold, also used when HR falls in a gap between zones
  pub fn classify(&self, activity: &Activity, zones: Option<&HeartRateZones>) -> ClassifiedActivity {
    let (intensity, intensity_source, zone_index) = match activity.usable_heartrate() {
      None => (Intensity::Unlabeled, IntensitySource::NoHeartRate, None),
      Some(hr) => match zones.filter(|z| !z.is_empty()).and_then(|z| z.zone_index(hr)) {
        Some(index) => (
          self.intensity_for_zone(index),
          IntensitySource::ZoneBased,
          Some(index),
        ),
        None => (self.fixed_threshold(hr), IntensitySource::FixedThreshold, None),
      },
    };

    ClassifiedActivity {
      activity: activity.clone(),
      intensity,
      intensity_source,
      zone_index,
    }
  }

  fn intensity_for_zone(&self, index: usize) -> Intensity {
    if index < self.easy_zone_count {
      Intensity::Easy
    } else {
      Intensity::Hard
    }
  }

  fn fixed_threshold(&self, hr: f64) -> Intensity {
    if hr <= self.easy_max_hr {
      Intensity::Easy
    } else {
      Intensity::Hard
    }
  }
}

/// Classify with the default 145 bpm / two-easy-zone rules.
pub fn classify(activity: &Activity, zones: Option<&HeartRateZones>) -> ClassifiedActivity {
  ClassificationRules::default().classify(activity, zones)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
