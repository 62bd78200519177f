//! Presentation-facing views over one activity fetch
//!
//! Builds the long listing window and the short chart window from the same
//! raw activities, and derives the per-week trend series and the 80/20
//! target comparison the charts are drawn from.

use std::cmp::Reverse;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::aggregate::{group_by_week_with, GroupedActivities, IntensityTotals, WeekStats};
use crate::config::AnalysisConfig;
use crate::models::{Activity, HeartRateZones};
use crate::weeks::week_end;
use crate::window::filter_window;

pub const TARGET_EASY_PCT: u32 = 80;
pub const TARGET_HARD_PCT: u32 = 20;

/// ---------------------------------------------------------------------------
/// Training Report
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
  pub generated_at: NaiveDateTime,
  pub listing_weeks: u32,
  pub chart_weeks: u32,
  /// Activities in the listing window, grouped per week
  pub listing: Option<GroupedActivities>,
  /// Activities in the chart window, grouped per week
  pub chart: Option<GroupedActivities>,
  pub zones_available: bool,
  /// Activities in the fetch with no usable start date
  pub skipped: usize,
}

impl TrainingReport {
  /// Build both windows from a single fetch.
  pub fn build(
    raw: &[Activity],
    zones: Option<&HeartRateZones>,
    config: &AnalysisConfig,
    now: NaiveDateTime,
  ) -> Self {
    let sorted = sort_newest_first(raw);

    let listing_window = filter_window(&sorted, config.listing_weeks, now);
    let chart_window = filter_window(&sorted, config.chart_weeks, now);

    let mut listing = group_by_week_with(&config.rules, &listing_window.activities, zones);
    if let Some(listing) = listing.as_mut() {
      listing.skipped += listing_window.skipped;
    }
    let mut chart = group_by_week_with(&config.rules, &chart_window.activities, zones);
    if let Some(chart) = chart.as_mut() {
      chart.skipped += chart_window.skipped;
    }

    Self {
      generated_at: now,
      listing_weeks: config.listing_weeks,
      chart_weeks: config.chart_weeks,
      listing,
      chart,
      zones_available: zones.is_some_and(|z| !z.is_empty()),
      // Undated activities fall outside every window, so both counts agree
      skipped: listing_window.skipped,
    }
  }

  /// Chart series, oldest week first
  pub fn trend(&self) -> Vec<WeeklyTrendPoint> {
    self
      .chart
      .as_ref()
      .map(|chart| {
        chart
          .weeks_oldest_first()
          .map(|(monday, week)| WeeklyTrendPoint::new(*monday, week))
          .collect()
      })
      .unwrap_or_default()
  }

  /// Overall chart-window split against the 80/20 target
  pub fn target_comparison(&self) -> Option<TargetComparison> {
    self
      .chart
      .as_ref()
      .filter(|chart| !chart.is_empty())
      .map(|chart| TargetComparison::from_totals(chart.totals()))
  }

  /// Report plus its derived views, as emitted by the JSON output
  pub fn to_json(&self) -> serde_json::Value {
    serde_json::json!({
      "report": self,
      "trend": self.trend(),
      "overall": self.overall(),
      "target": self.target_comparison(),
    })
  }

  /// Easy/hard/N/A time across the whole chart window
  pub fn overall(&self) -> Option<OverallBreakdown> {
    self
      .chart
      .as_ref()
      .filter(|chart| !chart.is_empty())
      .map(|chart| OverallBreakdown::from_totals(chart.totals()))
  }
}

/// Newest first by local start; undated activities go last.
fn sort_newest_first(raw: &[Activity]) -> Vec<Activity> {
  let mut sorted = raw.to_vec();
  sorted.sort_by_key(|a| Reverse(a.local_start()));
  sorted
}

/// ---------------------------------------------------------------------------
/// Chart Series
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTrendPoint {
  pub week_start: NaiveDate,
  pub label: String,
  pub easy_pct: u32,
  pub hard_pct: u32,
  pub easy_hours: f64,
  pub hard_hours: f64,
  pub na_hours: f64,
  pub total_hours: f64,
  pub tracked_time: i64,
}

impl WeeklyTrendPoint {
  fn new(monday: NaiveDate, week: &WeekStats) -> Self {
    Self {
      week_start: monday,
      label: format_week_label(monday),
      easy_pct: week.easy_percentage(),
      hard_pct: week.hard_percentage(),
      easy_hours: hours(week.easy_time),
      hard_hours: hours(week.hard_time),
      na_hours: hours(week.na_time),
      total_hours: hours(week.total_time),
      tracked_time: week.tracked_time,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetComparison {
  pub totals: IntensityTotals,
  pub easy_pct: u32,
  pub hard_pct: u32,
  /// Positive when more easy time than the target
  pub easy_delta_pct: i64,
  pub on_target: bool,
}

impl TargetComparison {
  /// Within 5 points of 80% easy counts as on target
  const TOLERANCE_PCT: i64 = 5;

  fn from_totals(totals: IntensityTotals) -> Self {
    let easy_pct = totals.easy_percentage();
    let easy_delta_pct = easy_pct as i64 - TARGET_EASY_PCT as i64;
    Self {
      totals,
      easy_pct,
      hard_pct: totals.hard_percentage(),
      easy_delta_pct,
      on_target: totals.tracked_time > 0 && easy_delta_pct.abs() <= Self::TOLERANCE_PCT,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallBreakdown {
  pub totals: IntensityTotals,
  pub easy: String,
  pub hard: String,
  pub na: String,
  /// N/A time as a share of all recorded time, one decimal
  pub na_share_pct: f64,
}

impl OverallBreakdown {
  fn from_totals(totals: IntensityTotals) -> Self {
    Self {
      totals,
      easy: format_duration_hm(totals.easy_time),
      hard: format_duration_hm(totals.hard_time),
      na: format_duration_hm(totals.na_time),
      na_share_pct: totals.na_share_of_total(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Formatting
/// ---------------------------------------------------------------------------

/// Seconds to hours, 2 decimal places
pub fn hours(seconds: i64) -> f64 {
  (seconds as f64 / 36.0).round() / 100.0
}

/// `HH:MM:SS`, or `MM:SS` under an hour
pub fn format_duration(seconds: i64) -> String {
  if seconds < 0 {
    return "00:00".to_string();
  }
  let h = seconds / 3600;
  let m = (seconds % 3600) / 60;
  let s = seconds % 60;
  if h > 0 {
    format!("{:02}:{:02}:{:02}", h, m, s)
  } else {
    format!("{:02}:{:02}", m, s)
  }
}

/// `Xh Ym`
pub fn format_duration_hm(seconds: i64) -> String {
  let seconds = seconds.max(0);
  format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

pub fn format_distance(meters: f64) -> String {
  format!("{:.2} km", meters / 1000.0)
}

pub fn format_speed_kmh(meters_per_second: f64) -> String {
  format!("{:.2} km/h", meters_per_second * 3.6)
}

/// `May 6 - May 12`, with the year appended when it is not `current_year`
pub fn format_week_range(monday: NaiveDate, current_year: i32) -> String {
  let label = format_week_label(monday);
  if monday.year() != current_year {
    format!("{}, {}", label, monday.year())
  } else {
    label
  }
}

fn format_week_label(monday: NaiveDate) -> String {
  let sunday = week_end(monday);
  format!("{} - {}", monday.format("%b %-d"), sunday.format("%b %-d"))
}

/// Plain-text listing, newest week first
pub fn render_listing(grouped: &GroupedActivities, current_year: i32) -> String {
  let mut out = String::new();

  for (monday, week) in grouped.weeks_newest_first() {
    out.push_str(&format_week_range(*monday, current_year));
    out.push('\n');
    out.push_str(&format!(
      "  Easy: {}% ({})  Hard: {}% ({})",
      week.easy_percentage(),
      format_duration(week.easy_time),
      week.hard_percentage(),
      format_duration(week.hard_time),
    ));
    if week.na_time > 0 {
      out.push_str(&format!("  N/A: ({})", format_duration(week.na_time)));
    }
    out.push_str(&format!("  Total: ({})\n", format_duration(week.total_time)));

    for classified in &week.activities {
      let activity = &classified.activity;
      let hr = activity
        .usable_heartrate()
        .map(|hr| format!(", {} bpm", hr.round()))
        .unwrap_or_default();
      out.push_str(&format!(
        "    - {} [{}] {}, {}, {}{} -> {} ({})\n",
        activity.name,
        activity.activity_type,
        format_distance(activity.distance),
        format_duration(activity.moving_time),
        format_speed_kmh(activity.average_speed),
        hr,
        classified.intensity,
        classified.intensity_source,
      ));
    }
  }

  out
}

/// Full plain-text report: zone notice, listing, trend, overall split and
/// the 80/20 check.
pub fn render_text_report(report: &TrainingReport, easy_max_hr: f64, current_year: i32) -> String {
  let mut out = String::new();

  if !report.zones_available {
    out.push_str(&format!(
      "HR zones not available - using fixed threshold (Easy <= {} bpm)\n\n",
      easy_max_hr
    ));
  }

  match &report.listing {
    Some(listing) if !listing.is_empty() => {
      out.push_str(&format!("Activity Details (Last {} Weeks)\n\n", report.listing_weeks));
      out.push_str(&render_listing(listing, current_year));
    }
    _ => out.push_str(&format!(
      "No activities found in the last {} weeks.\n",
      report.listing_weeks
    )),
  }

  if report.skipped > 0 {
    out.push_str(&format!(
      "\nSkipped {} activities with an unparseable start date.\n",
      report.skipped
    ));
  }

  let trend = report.trend();
  if !trend.is_empty() {
    out.push_str(&format!("\nWeekly Trend (Last {} Weeks)\n", report.chart_weeks));
    for point in &trend {
      out.push_str(&format!(
        "  {:<16} easy {:>3}%  hard {:>3}%  {:>6.2} h\n",
        point.label, point.easy_pct, point.hard_pct, point.total_hours
      ));
    }
  }

  if let Some(overall) = report.overall() {
    out.push_str(&format!(
      "\nOverall (Last {} Weeks): Easy {}  Hard {}  N/A {} ({:.1}% of total)\n",
      report.chart_weeks, overall.easy, overall.hard, overall.na, overall.na_share_pct
    ));
  }

  if let Some(comparison) = report.target_comparison() {
    out.push_str(&format!(
      "\n{}/{} check: {}% easy / {}% hard ({:+} vs target) - {}\n",
      TARGET_EASY_PCT,
      TARGET_HARD_PCT,
      comparison.easy_pct,
      comparison.hard_pct,
      comparison.easy_delta_pct,
      if comparison.on_target { "on target" } else { "off target" }
    ));
  }

  out
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
