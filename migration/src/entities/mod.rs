pub mod days_to_hire_stats;
pub mod job_posting;

pub use days_to_hire_stats::Entity as DaysToHireStatsEntity;
pub use job_posting::Entity as JobPostingEntity;
