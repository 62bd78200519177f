use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Activity summary as returned by the athlete activities endpoint.
///
/// Every field carries a serde default so that partial records (manual
/// entries, activities recorded without a HR strap) still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
  pub id: i64,
  #[serde(default)]
  pub name: String,
  /// Meters
  #[serde(default)]
  pub distance: f64,
  /// Seconds
  #[serde(default)]
  pub moving_time: i64,
  /// Seconds
  #[serde(default)]
  pub elapsed_time: i64,
  /// Strava uses "type" for legacy and "sport_type" for newer activities
  #[serde(rename = "type", default)]
  pub activity_type: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sport_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_date: Option<String>,
  /// Athlete-local wall clock time. Strava suffixes it with a bogus `Z`.
  #[serde(default)]
  pub start_date_local: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timezone: Option<String>,
  /// m/s
  #[serde(default)]
  pub average_speed: f64,
  #[serde(default)]
  pub max_speed: f64,
  #[serde(default)]
  pub has_heartrate: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub average_heartrate: Option<f64>,
}

impl Activity {
  /// Local start as a civil date-time, or None when missing/unparseable.
  pub fn local_start(&self) -> Option<NaiveDateTime> {
    self.start_date_local.as_deref().and_then(parse_local_timestamp)
  }

  pub fn local_date(&self) -> Option<NaiveDate> {
    self.local_start().map(|dt| dt.date())
  }

  /// Average HR when the activity carries a usable reading.
  pub fn usable_heartrate(&self) -> Option<f64> {
    if !self.has_heartrate {
      return None;
    }
    self
      .average_heartrate
      .filter(|hr| hr.is_finite() && *hr > 0.0)
  }
}

/// Parse a local timestamp, keeping the wall clock part as written.
///
/// Accepts RFC 3339 (offset is ignored), naive ISO date-times with either a
/// `T` or a space separator, and bare dates (taken as midnight).
pub fn parse_local_timestamp(raw: &str) -> Option<NaiveDateTime> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.naive_local());
  }

  const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
  for format in FORMATS {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
      return Some(dt);
    }
  }

  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
}
