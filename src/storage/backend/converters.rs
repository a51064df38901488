use uuid::Uuid;

use crate::storage::{DaysToHireStats, JobPosting};
use migration::entities::{days_to_hire_stats, job_posting};

/// 将 Sea-ORM Model 转换为 DaysToHireStats
pub fn model_to_stats(model: days_to_hire_stats::Model) -> DaysToHireStats {
    DaysToHireStats {
        standard_job_id: model.standard_job_id,
        country_code: model.country_code,
        min_days: model.min_days,
        avg_days: model.avg_days,
        max_days: model.max_days,
        job_postings_number: i64::from(model.job_postings_number),
    }
}

/// 将统计结果转换为 ActiveModel（每次重算生成新的 id）
pub fn stats_to_active_model(stats: &DaysToHireStats) -> days_to_hire_stats::ActiveModel {
    use sea_orm::ActiveValue::Set;

    days_to_hire_stats::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        standard_job_id: Set(stats.standard_job_id.clone()),
        country_code: Set(stats.country_code.clone()),
        min_days: Set(stats.min_days),
        avg_days: Set(stats.avg_days),
        max_days: Set(stats.max_days),
        job_postings_number: Set(stats.job_postings_number.clamp(0, i32::MAX as i64) as i32),
    }
}

/// 将 JobPosting 转换为 ActiveModel
pub fn posting_to_active_model(posting: &JobPosting) -> job_posting::ActiveModel {
    use sea_orm::ActiveValue::Set;

    job_posting::ActiveModel {
        id: Set(posting.id.clone()),
        title: Set(posting.title.clone()),
        standard_job_id: Set(posting.standard_job_id.clone()),
        country_code: Set(posting.country_code.clone()),
        days_to_hire: Set(posting.days_to_hire),
    }
}
