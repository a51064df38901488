//! Recompute pipeline integration tests
//!
//! Runs the full extraction -> aggregation -> snapshot replacement flow
//! against temporary SQLite databases.

use hirestats::config::{ReplaceStrategy, init_config};
use hirestats::errors::HireStatsError;
use hirestats::pipeline::{PipelineSettings, recompute_stats};
use hirestats::storage::backend::SeaOrmStorage;
use hirestats::storage::{DaysToHireStats, JobPosting};
use hirestats::system::CancelFlag;
use sea_orm::ConnectionTrait;
use std::sync::Once;
use tempfile::TempDir;

// 确保 config 只初始化一次
static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("pipeline_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

fn posting(id: &str, job: &str, country: Option<&str>, days: Option<i32>) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: Some(format!("title {}", id)),
        standard_job_id: job.to_string(),
        country_code: country.map(str::to_string),
        days_to_hire: days,
    }
}

/// 测试数据集
///
/// - job-a/DE: 1..=10，另有 2 条 days 为空
/// - job-a/FR: 10 个 1
/// - job-a/US: 4 条，不足阈值
/// - job-a/无国家: 3 条 100，只进入跨国家汇总
/// - job-b/DE: 4 条，两个范围都不足阈值
/// - job-c/无国家: [0, 0, 0, 0, 10]
fn fixture() -> Vec<JobPosting> {
    let mut postings = Vec::new();
    for days in 1..=10 {
        postings.push(posting(&format!("a-de-{}", days), "job-a", Some("DE"), Some(days)));
    }
    postings.push(posting("a-de-null-1", "job-a", Some("DE"), None));
    postings.push(posting("a-de-null-2", "job-a", Some("DE"), None));
    for i in 0..10 {
        postings.push(posting(&format!("a-fr-{}", i), "job-a", Some("FR"), Some(1)));
    }
    for (i, days) in [20, 30, 40, 50].into_iter().enumerate() {
        postings.push(posting(&format!("a-us-{}", i), "job-a", Some("US"), Some(days)));
    }
    for i in 0..3 {
        postings.push(posting(&format!("a-none-{}", i), "job-a", None, Some(100)));
    }
    for i in 0..4 {
        postings.push(posting(&format!("b-de-{}", i), "job-b", Some("DE"), Some(7)));
    }
    for (i, days) in [0, 0, 0, 0, 10].into_iter().enumerate() {
        postings.push(posting(&format!("c-none-{}", i), "job-c", None, Some(days)));
    }
    postings
}

async fn seeded_storage() -> (SeaOrmStorage, TempDir) {
    let (storage, dir) = create_temp_storage().await;
    storage
        .insert_postings(&fixture())
        .await
        .expect("Failed to seed postings");
    (storage, dir)
}

fn settings(chunk_size: u64, replace_strategy: ReplaceStrategy) -> PipelineSettings {
    PipelineSettings {
        chunk_size,
        min_postings: 5,
        replace_strategy,
    }
}

fn find<'a>(
    rows: &'a [DaysToHireStats],
    job: &str,
    country: Option<&str>,
) -> Option<&'a DaysToHireStats> {
    rows.iter()
        .find(|r| r.standard_job_id == job && r.country_code.as_deref() == country)
}

// =============================================================================
// 基本重算
// =============================================================================

#[tokio::test]
async fn test_recompute_writes_expected_rows() {
    let (storage, _dir) = seeded_storage().await;

    let report = recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .expect("recompute failed");

    assert_eq!(report.rows_written, 4);
    assert_eq!(report.rows_cleared, 0);
    assert!(report.finished_at.is_some());

    let rows = storage.load_all_stats().await.unwrap();
    assert_eq!(rows.len(), 4);

    let de = find(&rows, "job-a", Some("DE")).expect("job-a/DE missing");
    assert_eq!(de.min_days, 1.1);
    assert_eq!(de.avg_days, 5.5);
    assert_eq!(de.max_days, 9.9);
    // 空 days_to_hire 不计入样本
    assert_eq!(de.job_postings_number, 10);

    let fr = find(&rows, "job-a", Some("FR")).expect("job-a/FR missing");
    assert_eq!((fr.min_days, fr.avg_days, fr.max_days), (1.0, 1.0, 1.0));
    assert_eq!(fr.job_postings_number, 10);

    let global_a = find(&rows, "job-a", None).expect("job-a global missing");
    assert_eq!(global_a.job_postings_number, 27);
    assert_eq!(global_a.min_days, 1.0);
    assert_eq!(global_a.max_days, 100.0);
    assert_eq!(global_a.avg_days, 505.0 / 27.0);

    let global_c = find(&rows, "job-c", None).expect("job-c global missing");
    assert_eq!(global_c.min_days, 0.0);
    assert_eq!(global_c.avg_days, 2.0);
    assert_eq!(global_c.max_days, 14.0);
    assert_eq!(global_c.job_postings_number, 5);
}

#[tokio::test]
async fn test_groups_below_threshold_produce_no_rows() {
    let (storage, _dir) = seeded_storage().await;

    recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap();

    let rows = storage.load_all_stats().await.unwrap();
    assert!(find(&rows, "job-a", Some("US")).is_none());
    assert!(find(&rows, "job-b", Some("DE")).is_none());
    assert!(find(&rows, "job-b", None).is_none());
    // 无国家的记录不产生按国家分组的行
    assert!(
        rows.iter()
            .all(|r| r.standard_job_id != "job-c" || r.country_code.is_none())
    );
}

#[tokio::test]
async fn test_every_row_satisfies_ordering_invariant() {
    let (storage, _dir) = seeded_storage().await;

    recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap();

    for row in storage.load_all_stats().await.unwrap() {
        assert!(row.min_days <= row.avg_days, "{:?}", row);
        assert!(row.avg_days <= row.max_days, "{:?}", row);
        assert!(row.job_postings_number >= 5, "{:?}", row);
    }
}

#[tokio::test]
async fn test_empty_source_produces_empty_snapshot() {
    let (storage, _dir) = create_temp_storage().await;

    let report = recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap();

    assert_eq!(report.rows_written, 0);
    assert_eq!(report.pages, 0);
    assert_eq!(storage.count_stats().await.unwrap(), 0);
}

// =============================================================================
// 幂等与分页
// =============================================================================

#[tokio::test]
async fn test_consecutive_runs_are_idempotent() {
    let (storage, _dir) = seeded_storage().await;
    let run_settings = settings(1000, ReplaceStrategy::Transactional);

    recompute_stats(&storage, run_settings, CancelFlag::new())
        .await
        .unwrap();
    let first = storage.load_all_stats().await.unwrap();

    let report = recompute_stats(&storage, run_settings, CancelFlag::new())
        .await
        .unwrap();
    let second = storage.load_all_stats().await.unwrap();

    // 第二次运行先清掉第一次的全部行，不会产生重复
    assert_eq!(report.rows_cleared, first.len() as u64);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_page_size_does_not_change_result() {
    let (storage, _dir) = seeded_storage().await;

    let small = recompute_stats(
        &storage,
        settings(1, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap();
    let by_one = storage.load_all_stats().await.unwrap();

    let large = recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap();
    let by_thousand = storage.load_all_stats().await.unwrap();

    assert_eq!(by_one, by_thousand);
    assert_eq!(small.pages, 4);
    assert_eq!(large.pages, 2);
    assert_eq!(small.groups_seen, large.groups_seen);
}

#[tokio::test]
async fn test_page_size_two_covers_every_group() {
    let (storage, _dir) = seeded_storage().await;

    let report = recompute_stats(
        &storage,
        settings(2, ReplaceStrategy::Incremental),
        CancelFlag::new(),
    )
    .await
    .unwrap();

    assert_eq!(report.rows_written, 4);
    assert_eq!(storage.count_stats().await.unwrap(), 4);
}

// =============================================================================
// 失败、回滚与取消
// =============================================================================

#[tokio::test]
async fn test_transactional_failure_keeps_previous_snapshot() {
    let (storage, _dir) = seeded_storage().await;

    recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap();
    let before = storage.load_all_stats().await.unwrap();
    assert_eq!(before.len(), 4);

    // 源表消失后提取必然失败
    storage
        .get_db()
        .execute_unprepared("DROP TABLE job_postings")
        .await
        .unwrap();

    let err = recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HireStatsError::DatabaseOperation(_)));

    let after = storage.load_all_stats().await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_incremental_failure_leaves_cleared_table() {
    let (storage, _dir) = seeded_storage().await;

    recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Incremental),
        CancelFlag::new(),
    )
    .await
    .unwrap();
    assert_eq!(storage.count_stats().await.unwrap(), 4);

    storage
        .get_db()
        .execute_unprepared("DROP TABLE job_postings")
        .await
        .unwrap();

    let result = recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Incremental),
        CancelFlag::new(),
    )
    .await;
    assert!(result.is_err());

    // 清表已提交，不会回滚
    assert_eq!(storage.count_stats().await.unwrap(), 0);
}

#[tokio::test]
async fn test_cancelled_run_keeps_previous_snapshot() {
    let (storage, _dir) = seeded_storage().await;

    recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap();

    let cancel = CancelFlag::new();
    cancel.cancel();

    let err = recompute_stats(
        &storage,
        settings(1, ReplaceStrategy::Transactional),
        cancel,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, HireStatsError::Cancelled(_)));
    assert_eq!(err.code(), "E008");
    assert_eq!(storage.count_stats().await.unwrap(), 4);
}

// =============================================================================
// 源数据写入
// =============================================================================

#[tokio::test]
async fn test_insert_postings_upserts_by_id() {
    let (storage, _dir) = create_temp_storage().await;

    let mut postings: Vec<JobPosting> = (1..=5)
        .map(|i| posting(&format!("p{}", i), "job-x", Some("NL"), Some(i)))
        .collect();
    storage.insert_postings(&postings).await.unwrap();

    // 同 id 再次写入覆盖旧值
    postings[0].days_to_hire = Some(50);
    storage.insert_postings(&postings[..1]).await.unwrap();

    recompute_stats(
        &storage,
        settings(1000, ReplaceStrategy::Transactional),
        CancelFlag::new(),
    )
    .await
    .unwrap();

    let rows = storage.load_all_stats().await.unwrap();
    let nl = find(&rows, "job-x", Some("NL")).expect("job-x/NL missing");
    assert_eq!(nl.job_postings_number, 5);
    // [2, 3, 4, 5, 50]
    assert_eq!(nl.min_days, 1.6);
    assert_eq!(nl.max_days, 68.0);
    assert_eq!(nl.avg_days, 12.8);
}
