//! HTTP API integration tests
//!
//! Exercises the stats lookup and health endpoints against a recomputed
//! snapshot in a temporary SQLite database.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use sea_orm::ConnectionTrait;
use serde_json::Value;

use hirestats::api::services::{AppStartTime, health_routes, stats_routes};
use hirestats::config::{ReplaceStrategy, init_config};
use hirestats::pipeline::{PipelineSettings, recompute_stats};
use hirestats::services::StatsService;
use hirestats::storage::backend::SeaOrmStorage;
use hirestats::storage::{DaysToHireStats, JobPosting};
use hirestats::system::CancelFlag;

use std::sync::Once;
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

fn posting(id: String, job: &str, country: Option<&str>, days: i32) -> JobPosting {
    JobPosting {
        id,
        title: None,
        standard_job_id: job.to_string(),
        country_code: country.map(str::to_string),
        days_to_hire: Some(days),
    }
}

/// 建库、写入 job-1/DE 1..=10 与 job-2/FR 4 条，并完成一次重算
async fn recomputed_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_static_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("api_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );

    let mut postings: Vec<JobPosting> = (1..=10)
        .map(|d| posting(format!("de-{}", d), "job-1", Some("DE"), d))
        .collect();
    postings.extend((1..=4).map(|d| posting(format!("fr-{}", d), "job-2", Some("FR"), d)));
    storage.insert_postings(&postings).await.unwrap();

    recompute_stats(
        &storage,
        PipelineSettings {
            chunk_size: 100,
            min_postings: 5,
            replace_strategy: ReplaceStrategy::Transactional,
        },
        CancelFlag::new(),
    )
    .await
    .unwrap();

    (storage, temp_dir)
}

macro_rules! stats_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(StatsService::new(
                    $storage.clone(),
                ))))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(AppStartTime::now()))
                .service(stats_routes())
                .service(health_routes()),
        )
        .await
    };
}

// =============================================================================
// GET /stats
// =============================================================================

#[actix_rt::test]
async fn test_lookup_by_country_returns_plain_stats_object() {
    let (storage, _dir) = recomputed_storage().await;
    let app = stats_app!(storage);

    let req = TestRequest::get()
        .uri("/stats?standard_job_id=job-1&country_code=DE")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: DaysToHireStats = test::read_body_json(resp).await;
    assert_eq!(
        body,
        DaysToHireStats {
            standard_job_id: "job-1".to_string(),
            country_code: Some("DE".to_string()),
            min_days: 1.1,
            avg_days: 5.5,
            max_days: 9.9,
            job_postings_number: 10,
        }
    );
}

#[actix_rt::test]
async fn test_lookup_without_country_returns_global_row() {
    let (storage, _dir) = recomputed_storage().await;
    let app = stats_app!(storage);

    let req = TestRequest::get()
        .uri("/stats?standard_job_id=job-1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["standard_job_id"], "job-1");
    assert!(body["country_code"].is_null());
    assert_eq!(body["job_postings_number"], 10);
}

#[actix_rt::test]
async fn test_empty_country_is_treated_as_absent() {
    let (storage, _dir) = recomputed_storage().await;
    let app = stats_app!(storage);

    let req = TestRequest::get()
        .uri("/stats?standard_job_id=job-1&country_code=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["country_code"].is_null());
}

#[actix_rt::test]
async fn test_unknown_pair_returns_404() {
    let (storage, _dir) = recomputed_storage().await;
    let app = stats_app!(storage);

    for uri in [
        "/stats?standard_job_id=job-1&country_code=US",
        "/stats?standard_job_id=missing",
        // 样本不足的分组没有统计行
        "/stats?standard_job_id=job-2&country_code=FR",
    ] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Statistics not found");
        assert_eq!(body["code"], 3000);
    }
}

#[actix_rt::test]
async fn test_missing_job_id_returns_400() {
    let (storage, _dir) = recomputed_storage().await;
    let app = stats_app!(storage);

    for uri in ["/stats", "/stats?country_code=DE", "/stats?standard_job_id=%20"] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[actix_rt::test]
async fn test_storage_failure_returns_500_with_cause() {
    let (storage, _dir) = recomputed_storage().await;
    let app = stats_app!(storage);

    storage
        .get_db()
        .execute_unprepared("DROP TABLE days_to_hire_stats")
        .await
        .unwrap();

    let req = TestRequest::get()
        .uri("/stats?standard_job_id=job-1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);
    assert!(!body["message"].as_str().unwrap_or_default().is_empty());
}

// =============================================================================
// GET /health
// =============================================================================

#[actix_rt::test]
async fn test_health_reports_snapshot_size() {
    let (storage, _dir) = recomputed_storage().await;
    let app = stats_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["code"], 0);
    assert_eq!(body["storage"]["backend"], "sqlite");
    // job-1/DE 与 job-1 汇总
    assert_eq!(body["storage"]["stats_rows"], 2);
}

#[actix_rt::test]
async fn test_liveness_and_readiness() {
    let (storage, _dir) = recomputed_storage().await;
    let app = stats_app!(storage);

    let live = test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(live.status(), StatusCode::NO_CONTENT);

    let ready =
        test::call_service(&app, TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(ready.status(), StatusCode::OK);
}
