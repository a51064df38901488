//! Days-to-hire 统计快照实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "days_to_hire_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub standard_job_id: String,
    /// None 表示跨国家汇总
    pub country_code: Option<String>,
    pub min_days: f64,
    pub avg_days: f64,
    pub max_days: f64,
    pub job_postings_number: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
