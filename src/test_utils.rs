//! Test utilities shared by the unit tests
//!
//! - Activity factories (with and without HR)
//! - Zone fixtures
//! - Fixed "now" values

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Activity, HeartRateZoneRange, HeartRateZones};

/// ---------------------------------------------------------------------------
/// Activity Factories
/// ---------------------------------------------------------------------------

/// A 10 km run without heart rate data
pub fn activity_without_hr(id: i64, start_date_local: &str, moving_time: i64) -> Activity {
  Activity {
    id,
    name: format!("Run {}", id),
    distance: 10000.0,
    moving_time,
    elapsed_time: moving_time + 60,
    activity_type: "Run".to_string(),
    sport_type: Some("Run".to_string()),
    start_date: None,
    start_date_local: Some(start_date_local.to_string()),
    timezone: None,
    average_speed: 2.8,
    max_speed: 4.1,
    has_heartrate: false,
    average_heartrate: None,
  }
}

pub fn activity_with_hr(id: i64, start_date_local: &str, moving_time: i64, avg_hr: f64) -> Activity {
  Activity {
    has_heartrate: true,
    average_heartrate: Some(avg_hr),
    ..activity_without_hr(id, start_date_local, moving_time)
  }
}

pub fn activity_without_date(id: i64, moving_time: i64) -> Activity {
  Activity {
    start_date_local: None,
    ..activity_without_hr(id, "", moving_time)
  }
}

/// ---------------------------------------------------------------------------
/// Zone Fixtures
/// ---------------------------------------------------------------------------

/// [0-120], [121-150], [151-open]
pub fn three_zones() -> HeartRateZones {
  HeartRateZones::new(vec![
    HeartRateZoneRange::new(0.0, 120.0),
    HeartRateZoneRange::new(121.0, 150.0),
    HeartRateZoneRange::open_ended(151.0),
  ])
}

/// Typical Strava five-zone profile
pub fn five_zones() -> HeartRateZones {
  HeartRateZones::new(vec![
    HeartRateZoneRange::new(0.0, 129.0),
    HeartRateZoneRange::new(129.0, 160.0),
    HeartRateZoneRange::new(160.0, 176.0),
    HeartRateZoneRange::new(176.0, 192.0),
    HeartRateZoneRange::open_ended(192.0),
  ])
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
  date(y, m, d).and_hms_opt(h, min, 0).expect("valid test time")
}

/// Wednesday 2024-05-08, 15:30 local
pub fn fixed_wednesday() -> NaiveDateTime {
  datetime(2024, 5, 8, 15, 30)
}
