pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250627_000001_job_postings;
mod m20250627_000002_days_to_hire_stats;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250627_000001_job_postings::Migration),
            Box::new(m20250627_000002_days_to_hire_stats::Migration),
        ]
    }
}
