mod config;
pub mod driver;
pub mod geometry;
mod heart_progress;
mod metrics;

pub use config::{ConfigError, DriverConfig, HeartProgressConfig};
pub use driver::{HeartRateDriver, RandomHeartRate, ValueSource};
pub use geometry::{HeartFrame, ProgressState, Surface};
pub use heart_progress::HeartProgress;
pub use metrics::HeartMetrics;
