//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only operations on the stats snapshot.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{debug, error};

use super::{SeaOrmStorage, retry};
use crate::errors::{HireStatsError, Result};
use crate::storage::DaysToHireStats;

use migration::entities::days_to_hire_stats;

use super::converters::model_to_stats;

impl SeaOrmStorage {
    /// 查询单个分组的统计
    ///
    /// `country_code == None` 匹配跨国家汇总行（`country_code IS NULL`）。
    pub async fn find_stats(
        &self,
        standard_job_id: &str,
        country_code: Option<&str>,
    ) -> Result<Option<DaysToHireStats>> {
        let db = &self.db;
        let job_owned = standard_job_id.to_string();
        let country_owned = country_code.map(str::to_string);

        let op_name = format!(
            "find_stats({}, {})",
            standard_job_id,
            country_code.unwrap_or("*")
        );
        let result = retry::with_retry(&op_name, self.retry_config, || async {
            let country_filter = match &country_owned {
                Some(country) => days_to_hire_stats::Column::CountryCode.eq(country.clone()),
                None => days_to_hire_stats::Column::CountryCode.is_null(),
            };
            days_to_hire_stats::Entity::find()
                .filter(days_to_hire_stats::Column::StandardJobId.eq(job_owned.clone()))
                .filter(country_filter)
                .order_by_asc(days_to_hire_stats::Column::Id)
                .one(db)
                .await
        })
        .await;

        match result {
            Ok(model) => {
                debug!("{} -> found: {}", op_name, model.is_some());
                Ok(model.map(model_to_stats))
            }
            Err(e) => {
                error!("查询统计失败（重试后仍失败）: {}", e);
                Err(HireStatsError::database_operation(format!(
                    "查询统计失败: {}",
                    e
                )))
            }
        }
    }

    /// 统计快照中的行数
    pub async fn count_stats(&self) -> Result<u64> {
        let db = &self.db;
        retry::with_retry("count_stats", self.retry_config, || async {
            days_to_hire_stats::Entity::find().count(db).await
        })
        .await
        .map_err(|e| HireStatsError::database_operation(format!("统计行数失败: {}", e)))
    }

    /// 加载整个统计快照（按分组键排序）
    pub async fn load_all_stats(&self) -> Result<Vec<DaysToHireStats>> {
        let models = days_to_hire_stats::Entity::find()
            .order_by_asc(days_to_hire_stats::Column::StandardJobId)
            .order_by_asc(days_to_hire_stats::Column::CountryCode)
            .all(&self.db)
            .await
            .map_err(|e| HireStatsError::database_operation(format!("加载统计快照失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_stats).collect())
    }
}
