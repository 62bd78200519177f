pub mod aggregate;
pub mod config;
pub mod feed;
pub mod intensity;
pub mod models;
pub mod report;
pub mod weeks;
pub mod window;

#[cfg(test)]
mod test_utils;

use chrono::{Datelike, Local};

use config::{AnalysisConfig, OutputFormat};
use feed::{ActivityFeed, FeedError, JsonActivityFeed, JsonZoneProvider, ZoneConfigProvider};
use report::{render_text_report, TrainingReport};

pub use aggregate::{group_by_week, GroupedActivities, WeekStats};
pub use intensity::{classify, ClassifiedActivity, Intensity, IntensitySource};
pub use models::{Activity, HeartRateZones};

/// Load the activity and zone dumps named in the environment and print the
/// weekly 80/20 breakdown.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let config = AnalysisConfig::from_env()?;

  let activities_path = config
    .activities_path
    .clone()
    .ok_or_else(|| FeedError::MissingConfig(config::ENV_ACTIVITIES_PATH.into()))?;
  let activities = JsonActivityFeed::from_path(&activities_path).fetch_activities()?;

  let zone_provider = match &config.zones_path {
    Some(path) => JsonZoneProvider::from_path(path),
    None => JsonZoneProvider::none(),
  };
  let zones = zone_provider.fetch_zones();

  let now = Local::now().naive_local();
  let report = TrainingReport::build(&activities, zones.zones(), &config, now);

  match config.output {
    OutputFormat::Json => {
      println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    }
    OutputFormat::Text => print!(
      "{}",
      render_text_report(&report, config.rules.easy_max_hr, now.year())
    ),
  }

  Ok(())
}
