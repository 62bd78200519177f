pub mod activity;
pub mod zones;

pub use activity::Activity;
pub use zones::{AthleteZonesResponse, HeartRateZoneRange, HeartRateZones};
