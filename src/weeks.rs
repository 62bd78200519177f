use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Monday that starts the Monday-Sunday week containing `timestamp`.
/// Time of day never affects the result.
pub fn week_start(timestamp: NaiveDateTime) -> NaiveDate {
  week_start_of_date(timestamp.date())
}

pub fn week_start_of_date(date: NaiveDate) -> NaiveDate {
  // Sunday is 6 days from Monday, so it lands on the previous Monday
  let days_from_monday = date.weekday().num_days_from_monday() as i64;
  date - Duration::days(days_from_monday)
}

/// Sunday closing the week that starts on `monday`
pub fn week_end(monday: NaiveDate) -> NaiveDate {
  monday + Duration::days(6)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{date, datetime};

  #[test]
  fn test_monday_is_its_own_bucket() {
    assert_eq!(week_start(datetime(2024, 5, 6, 0, 0)), date(2024, 5, 6));
    assert_eq!(week_start(datetime(2024, 5, 6, 23, 59)), date(2024, 5, 6));
  }

  #[test]
  fn test_sunday_belongs_to_previous_monday() {
    assert_eq!(week_start(datetime(2024, 5, 12, 21, 0)), date(2024, 5, 6));
  }

  #[test]
  fn test_midweek_days() {
    for day in 6..=12 {
      assert_eq!(week_start(datetime(2024, 5, day, 12, 0)), date(2024, 5, 6));
    }
    assert_eq!(week_start(datetime(2024, 5, 13, 6, 0)), date(2024, 5, 13));
  }

  #[test]
  fn test_crosses_month_and_year() {
    // Wed 2025-01-01 -> Mon 2024-12-30
    assert_eq!(week_start(datetime(2025, 1, 1, 9, 0)), date(2024, 12, 30));
    // Sun 2024-03-03 -> Mon 2024-02-26 (leap year)
    assert_eq!(week_start(datetime(2024, 3, 3, 9, 0)), date(2024, 2, 26));
  }

  #[test]
  fn test_idempotent() {
    let once = week_start(datetime(2024, 5, 9, 18, 45));
    let twice = week_start_of_date(once);
    assert_eq!(once, twice);
  }

  #[test]
  fn test_week_end_crosses_year() {
    let monday = date(2024, 12, 30);
    assert_eq!(week_end(monday), date(2025, 1, 5));
  }
}
