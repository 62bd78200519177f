use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::intensity::{ClassificationRules, DEFAULT_EASY_MAX_HR, DEFAULT_EASY_ZONE_COUNT};

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const DEFAULT_LISTING_WEEKS: u32 = 12;
pub const DEFAULT_CHART_WEEKS: u32 = 8;
/// Longest accepted window, roughly twenty years
pub const MAX_WINDOW_WEEKS: u32 = 1040;

const ENV_LISTING_WEEKS: &str = "EIGHTY_LISTING_WEEKS";
const ENV_CHART_WEEKS: &str = "EIGHTY_CHART_WEEKS";
const ENV_EASY_MAX_HR: &str = "EIGHTY_EASY_MAX_HR";
const ENV_EASY_ZONE_COUNT: &str = "EIGHTY_EASY_ZONE_COUNT";
pub const ENV_ACTIVITIES_PATH: &str = "EIGHTY_ACTIVITIES_PATH";
const ENV_ZONES_PATH: &str = "EIGHTY_ZONES_PATH";
const ENV_OUTPUT: &str = "EIGHTY_OUTPUT";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value:?}")]
  Invalid { key: &'static str, value: String },
}

/// ---------------------------------------------------------------------------
/// Analysis Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl FromStr for OutputFormat {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      _ => Err(format!("Unknown output format: {}", s)),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
  /// Window for the detailed activity listing
  pub listing_weeks: u32,
  /// Window for the trend charts
  pub chart_weeks: u32,
  pub rules: ClassificationRules,
  pub activities_path: Option<PathBuf>,
  pub zones_path: Option<PathBuf>,
  pub output: OutputFormat,
}

impl Default for AnalysisConfig {
  fn default() -> Self {
    Self {
      listing_weeks: DEFAULT_LISTING_WEEKS,
      chart_weeks: DEFAULT_CHART_WEEKS,
      rules: ClassificationRules::default(),
      activities_path: None,
      zones_path: None,
      output: OutputFormat::Text,
    }
  }
}

impl AnalysisConfig {
  /// Read `EIGHTY_*` variables, falling back to defaults for anything unset.
  /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
  pub fn from_env() -> Result<Self, ConfigError> {
    let easy_max_hr: f64 = parse_var(ENV_EASY_MAX_HR, DEFAULT_EASY_MAX_HR)?;
    if !easy_max_hr.is_finite() || easy_max_hr <= 0.0 {
      return Err(ConfigError::Invalid {
        key: ENV_EASY_MAX_HR,
        value: easy_max_hr.to_string(),
      });
    }

    Ok(Self {
      listing_weeks: parse_weeks(ENV_LISTING_WEEKS, DEFAULT_LISTING_WEEKS)?,
      chart_weeks: parse_weeks(ENV_CHART_WEEKS, DEFAULT_CHART_WEEKS)?,
      rules: ClassificationRules {
        easy_max_hr,
        easy_zone_count: parse_var(ENV_EASY_ZONE_COUNT, DEFAULT_EASY_ZONE_COUNT)?,
      },
      activities_path: path_var(ENV_ACTIVITIES_PATH),
      zones_path: path_var(ENV_ZONES_PATH),
      output: parse_var(ENV_OUTPUT, OutputFormat::Text)?,
    })
  }
}

fn var(key: &str) -> Option<String> {
  env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
  match var(key) {
    Some(value) => value
      .parse()
      .map_err(|_| ConfigError::Invalid { key, value }),
    None => Ok(default),
  }
}

fn parse_weeks(key: &'static str, default: u32) -> Result<u32, ConfigError> {
  let weeks = parse_var(key, default)?;
  if weeks == 0 || weeks > MAX_WINDOW_WEEKS {
    return Err(ConfigError::Invalid {
      key,
      value: weeks.to_string(),
    });
  }
  Ok(weeks)
}

fn path_var(key: &str) -> Option<PathBuf> {
  var(key).map(PathBuf::from)
}
