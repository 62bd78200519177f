//! Trailing week windows over the raw activity set

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::Activity;
use crate::weeks::week_start;

/// Activities inside a trailing window, plus how many were dropped for
/// having no usable start date.
#[derive(Debug, Clone, Serialize)]
pub struct WindowedActivities {
  pub start: NaiveDate,
  pub weeks: u32,
  pub activities: Vec<Activity>,
  pub skipped: usize,
}

/// First day (a Monday) of an N-week window ending with the current week.
/// A zero-week window is treated as the current week only. Windows reaching
/// past the earliest representable date start at `NaiveDate::MIN`.
pub fn window_start(now: NaiveDateTime, weeks: u32) -> NaiveDate {
  let back = Days::new(7 * (u64::from(weeks.max(1)) - 1));
  week_start(now).checked_sub_days(back).unwrap_or(NaiveDate::MIN)
}

/// Keep activities whose local start date is on or after the window start.
/// Input order is preserved.
pub fn filter_window(activities: &[Activity], weeks: u32, now: NaiveDateTime) -> WindowedActivities {
  let start = window_start(now, weeks);
  let mut kept = Vec::with_capacity(activities.len());
  let mut skipped = 0;

  for activity in activities {
    match activity.local_date() {
      Some(date) if date >= start => kept.push(activity.clone()),
      Some(_) => {}
      None => {
        log::warn!(
          "Skipping activity {} in {}-week window: unparseable start date {:?}",
          activity.id,
          weeks,
          activity.start_date_local
        );
        skipped += 1;
      }
    }
  }

  log::debug!(
    "{}-week window from {}: kept {} of {} activities",
    weeks,
    start,
    kept.len(),
    activities.len()
  );

  WindowedActivities {
    start,
    weeks: weeks.max(1),
    activities: kept,
    skipped,
  }
}
