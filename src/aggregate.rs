//! Weekly aggregation of classified activities
//!
//! Folds a filtered activity list into Monday-keyed week buckets carrying
//! easy/hard/unlabeled time totals. Percentages are derived on read.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::intensity::{ClassificationRules, ClassifiedActivity, Intensity};
use crate::models::{Activity, HeartRateZones};
use crate::weeks::week_start;

/// ---------------------------------------------------------------------------
/// Week Statistics
/// ---------------------------------------------------------------------------

/// Durations are moving time in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekStats {
  /// In input order
  pub activities: Vec<ClassifiedActivity>,
  pub easy_time: i64,
  pub hard_time: i64,
  pub na_time: i64,
  /// easy + hard
  pub tracked_time: i64,
  /// easy + hard + na
  pub total_time: i64,
}

impl WeekStats {
  pub fn push(&mut self, classified: ClassifiedActivity) {
    let moving_time = classified.activity.moving_time;
    self.total_time += moving_time;

    match classified.intensity {
      Intensity::Easy => {
        self.easy_time += moving_time;
        self.tracked_time += moving_time;
      }
      Intensity::Hard => {
        self.hard_time += moving_time;
        self.tracked_time += moving_time;
      }
      Intensity::Unlabeled => self.na_time += moving_time,
    }

    self.activities.push(classified);
  }

  /// Share of tracked time spent easy, rounded to a whole percent
  pub fn easy_percentage(&self) -> u32 {
    rounded_percentage(self.easy_time, self.tracked_time)
  }

  pub fn hard_percentage(&self) -> u32 {
    rounded_percentage(self.hard_time, self.tracked_time)
  }
}

/// Whole-number percentage of `part` in `whole`; 0 when `whole` is 0.
pub fn rounded_percentage(part: i64, whole: i64) -> u32 {
  if whole <= 0 {
    return 0;
  }
  ((part as f64 / whole as f64) * 100.0).round().max(0.0) as u32
}

/// ---------------------------------------------------------------------------
/// Totals Across Weeks
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensityTotals {
  pub easy_time: i64,
  pub hard_time: i64,
  pub na_time: i64,
  pub tracked_time: i64,
  pub total_time: i64,
}

impl IntensityTotals {
  pub fn easy_percentage(&self) -> u32 {
    rounded_percentage(self.easy_time, self.tracked_time)
  }

  pub fn hard_percentage(&self) -> u32 {
    rounded_percentage(self.hard_time, self.tracked_time)
  }

  /// Share of all recorded time without HR, one decimal
  pub fn na_share_of_total(&self) -> f64 {
    if self.total_time <= 0 {
      return 0.0;
    }
    ((self.na_time as f64 / self.total_time as f64) * 1000.0).round() / 10.0
  }
}

/// ---------------------------------------------------------------------------
/// Grouped Result
/// ---------------------------------------------------------------------------

/// Week buckets keyed by their Monday. Only weeks with at least one
/// activity are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedActivities {
  pub weeks: BTreeMap<NaiveDate, WeekStats>,
  /// Activities dropped for an unparseable start date
  pub skipped: usize,
}

impl GroupedActivities {
  pub fn get(&self, week: NaiveDate) -> Option<&WeekStats> {
    self.weeks.get(&week)
  }

  pub fn len(&self) -> usize {
    self.weeks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.weeks.is_empty()
  }

  pub fn activity_count(&self) -> usize {
    self.weeks.values().map(|w| w.activities.len()).sum()
  }

  /// Listing order
  pub fn weeks_newest_first(&self) -> impl Iterator<Item = (&NaiveDate, &WeekStats)> {
    self.weeks.iter().rev()
  }

  /// Chart order
  pub fn weeks_oldest_first(&self) -> impl Iterator<Item = (&NaiveDate, &WeekStats)> {
    self.weeks.iter()
  }

  pub fn totals(&self) -> IntensityTotals {
    self
      .weeks
      .values()
      .fold(IntensityTotals::default(), |mut totals, week| {
        totals.easy_time += week.easy_time;
        totals.hard_time += week.hard_time;
        totals.na_time += week.na_time;
        totals.tracked_time += week.tracked_time;
        totals.total_time += week.total_time;
        totals
      })
  }
}

/// ---------------------------------------------------------------------------
/// Grouping
/// ---------------------------------------------------------------------------

/// Classify and bucket activities with the default rules.
///
/// Returns None for an empty input so callers can tell "nothing fetched yet"
/// apart from a result with no usable activities.
pub fn group_by_week(activities: &[Activity], zones: Option<&HeartRateZones>) -> Option<GroupedActivities> {
  group_by_week_with(&ClassificationRules::default(), activities, zones)
}

pub fn group_by_week_with(
  rules: &ClassificationRules,
  activities: &[Activity],
  zones: Option<&HeartRateZones>,
) -> Option<GroupedActivities> {
  if activities.is_empty() {
    return None;
  }

  let mut grouped = GroupedActivities::default();

  for activity in activities {
    let Some(started) = activity.local_start() else {
      log::warn!(
        "Skipping activity {} from weekly totals: unparseable start date {:?}",
        activity.id,
        activity.start_date_local
      );
      grouped.skipped += 1;
      continue;
    };

    let classified = rules.classify(activity, zones);
    grouped
      .weeks
      .entry(week_start(started))
      .or_default()
      .push(classified);
  }

  log::debug!(
    "Grouped {} activities into {} weeks ({} skipped)",
    activities.len() - grouped.skipped,
    grouped.weeks.len(),
    grouped.skipped
  );

  Some(grouped)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
