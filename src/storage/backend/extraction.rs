//! 分组提取查询
//!
//! 按 (standard_job_id, country_code) 或仅按 standard_job_id 对招聘记录分组，
//! 每组产出一份 days_to_hire 原始样本。分页使用 keyset（游标）方式：
//! 下一页从上一页最后一个分组键之后开始，排序列即游标列。
//!
//! 每页分两步：
//! 1. 分组键查询（GROUP BY + HAVING COUNT >= min_postings + ORDER BY + LIMIT）
//! 2. 按本页涉及的 job 拉取样本值，在内存中按分组键归桶
//!
//! 归桶按字节比较分组键，而 GROUP BY 使用数据库排序规则（MySQL 默认忽略大小写与
//! 尾随空格）。两者不一致时样本数与分组计数对不上，此时整页报错而不是写入残缺样本。

use std::collections::{HashMap, HashSet};

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ExprTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect,
};
use tracing::{trace, warn};

use crate::storage::{GroupKey, GroupScope, StatsGroup};
use migration::entities::job_posting;

/// 按国家分组的键查询结果行
#[derive(Debug, FromQueryResult)]
struct CountryGroupRow {
    standard_job_id: String,
    country_code: String,
    posting_count: i64,
}

/// 跨国家分组的键查询结果行
#[derive(Debug, FromQueryResult)]
struct GlobalGroupRow {
    standard_job_id: String,
    posting_count: i64,
}

/// 获取一页分组及其样本
///
/// # Arguments
/// - `after`: 上一页最后一个分组键，`None` 表示第一页
/// - `limit`: 每页最多分组数
/// - `min_postings`: 分组最少有效记录数（days_to_hire 非空）
pub async fn fetch_group_page<C: ConnectionTrait>(
    db: &C,
    scope: GroupScope,
    after: Option<&GroupKey>,
    limit: u64,
    min_postings: u64,
) -> Result<Vec<StatsGroup>, DbErr> {
    let keys = match scope {
        GroupScope::ByCountry => fetch_country_keys(db, after, limit, min_postings).await?,
        GroupScope::Global => fetch_global_keys(db, after, limit, min_postings).await?,
    };

    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let rows = fetch_samples(db, scope, &keys).await?;
    let groups = bucket_samples(scope, keys, rows)?;

    trace!(
        "Fetched {} {} groups after {:?}",
        groups.len(),
        scope.as_str(),
        after
    );
    Ok(groups)
}

async fn fetch_country_keys<C: ConnectionTrait>(
    db: &C,
    after: Option<&GroupKey>,
    limit: u64,
    min_postings: u64,
) -> Result<Vec<(GroupKey, i64)>, DbErr> {
    let mut condition = Condition::all()
        .add(job_posting::Column::DaysToHire.is_not_null())
        .add(job_posting::Column::CountryCode.is_not_null());

    // keyset: (job, country) > (after.job, after.country)
    if let Some(after) = after {
        let after_country = after.country_code.clone().unwrap_or_default();
        condition = condition.add(
            Condition::any()
                .add(job_posting::Column::StandardJobId.gt(after.standard_job_id.clone()))
                .add(
                    Condition::all()
                        .add(job_posting::Column::StandardJobId.eq(after.standard_job_id.clone()))
                        .add(job_posting::Column::CountryCode.gt(after_country)),
                ),
        );
    }

    let rows = job_posting::Entity::find()
        .select_only()
        .column(job_posting::Column::StandardJobId)
        .column(job_posting::Column::CountryCode)
        .column_as(job_posting::Column::Id.count(), "posting_count")
        .filter(condition)
        .group_by(job_posting::Column::StandardJobId)
        .group_by(job_posting::Column::CountryCode)
        .having(job_posting::Column::Id.count().gte(min_postings as i64))
        .order_by_asc(job_posting::Column::StandardJobId)
        .order_by_asc(job_posting::Column::CountryCode)
        .limit(limit)
        .into_model::<CountryGroupRow>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                GroupKey::new(row.standard_job_id, Some(row.country_code)),
                row.posting_count,
            )
        })
        .collect())
}

async fn fetch_global_keys<C: ConnectionTrait>(
    db: &C,
    after: Option<&GroupKey>,
    limit: u64,
    min_postings: u64,
) -> Result<Vec<(GroupKey, i64)>, DbErr> {
    let mut condition = Condition::all().add(job_posting::Column::DaysToHire.is_not_null());

    if let Some(after) = after {
        condition =
            condition.add(job_posting::Column::StandardJobId.gt(after.standard_job_id.clone()));
    }

    let rows = job_posting::Entity::find()
        .select_only()
        .column(job_posting::Column::StandardJobId)
        .column_as(job_posting::Column::Id.count(), "posting_count")
        .filter(condition)
        .group_by(job_posting::Column::StandardJobId)
        .having(job_posting::Column::Id.count().gte(min_postings as i64))
        .order_by_asc(job_posting::Column::StandardJobId)
        .limit(limit)
        .into_model::<GlobalGroupRow>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| (GroupKey::global(row.standard_job_id), row.posting_count))
        .collect())
}

/// 样本查询结果行：(standard_job_id, country_code, days_to_hire)
type SampleRow = (String, Option<String>, i32);

/// 拉取本页分组涉及的 job 的全部样本值
async fn fetch_samples<C: ConnectionTrait>(
    db: &C,
    scope: GroupScope,
    keys: &[(GroupKey, i64)],
) -> Result<Vec<SampleRow>, DbErr> {
    let jobs: Vec<String> = keys
        .iter()
        .map(|(key, _)| key.standard_job_id.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let mut condition = Condition::all()
        .add(job_posting::Column::DaysToHire.is_not_null())
        .add(job_posting::Column::StandardJobId.is_in(jobs));
    if scope == GroupScope::ByCountry {
        condition = condition.add(job_posting::Column::CountryCode.is_not_null());
    }

    job_posting::Entity::find()
        .select_only()
        .column(job_posting::Column::StandardJobId)
        .column(job_posting::Column::CountryCode)
        .column(job_posting::Column::DaysToHire)
        .filter(condition)
        .into_tuple::<SampleRow>()
        .all(db)
        .await
}

/// 按分组键归桶，并校验每组样本数与分组查询的计数一致
///
/// 同一 job 下不在本页的国家分组的样本直接丢弃；本页分组的样本数不一致时返回错误。
fn bucket_samples(
    scope: GroupScope,
    keys: Vec<(GroupKey, i64)>,
    rows: Vec<SampleRow>,
) -> Result<Vec<StatsGroup>, DbErr> {
    let mut buckets: HashMap<GroupKey, Vec<i64>> = keys
        .iter()
        .map(|(key, count)| (key.clone(), Vec::with_capacity(*count as usize)))
        .collect();

    for (standard_job_id, country_code, days_to_hire) in rows {
        let key = match scope {
            GroupScope::ByCountry => GroupKey::new(standard_job_id, country_code),
            GroupScope::Global => GroupKey::global(standard_job_id),
        };
        if let Some(samples) = buckets.get_mut(&key) {
            samples.push(i64::from(days_to_hire));
        }
    }

    keys.into_iter()
        .map(|(key, expected)| {
            let samples = buckets.remove(&key).unwrap_or_default();
            if samples.len() as i64 != expected {
                warn!(
                    "Sample count mismatch for group {}: grouped {}, bucketed {}",
                    key,
                    expected,
                    samples.len()
                );
                return Err(DbErr::Custom(format!(
                    "样本数与分组计数不一致 ({}): 分组 {} 条, 归桶 {} 条; \
                     请检查分组列的排序规则是否区分大小写与尾随空格",
                    key,
                    expected,
                    samples.len()
                )));
            }
            Ok(StatsGroup { key, samples })
        })
        .collect()
}
