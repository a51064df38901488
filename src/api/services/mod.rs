pub mod health;
pub mod stats;

pub use health::{AppStartTime, HealthService, health_routes};
pub use stats::{StatsApi, stats_routes};
