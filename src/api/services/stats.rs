//! Days-to-hire lookup endpoint
//!
//! `GET /stats?standard_job_id=...&country_code=...`
//!
//! - 200: 统计对象本身（不包裹 code/data）
//! - 400: 缺少 standard_job_id
//! - 404: `{"code": 3000, "message": "Statistics not found"}`
//! - 500: `{"code": 3001, "message": <原因>}`

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::trace;

use crate::api::response::{ErrorCode, error_response, json_response};
use crate::services::{LookupOutcome, StatsQuery, StatsService};

pub const STATS_NOT_FOUND_MESSAGE: &str = "Statistics not found";

/// 查询字符串参数；两个字段都可缺省，缺省的 job id 由处理函数返回 400
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsParams {
    pub standard_job_id: Option<String>,
    pub country_code: Option<String>,
}

pub struct StatsApi;

impl StatsApi {
    pub async fn get_stats(
        params: web::Query<StatsParams>,
        service: web::Data<Arc<StatsService>>,
    ) -> impl Responder {
        let params = params.into_inner();
        let Some(job_id) = params
            .standard_job_id
            .filter(|job| !job.trim().is_empty())
        else {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                "standard_job_id is required",
            );
        };

        let query = StatsQuery::new(job_id, params.country_code);
        trace!("Stats lookup: {:?}", query);

        match service.lookup(&query).await {
            LookupOutcome::Found(stats) => json_response(StatusCode::OK, &stats),
            LookupOutcome::NotFound => error_response(
                StatusCode::NOT_FOUND,
                ErrorCode::StatsNotFound,
                STATS_NOT_FOUND_MESSAGE,
            ),
            LookupOutcome::Failed(cause) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::StatsQueryFailed,
                cause,
            ),
        }
    }
}

/// Stats 路由配置
pub fn stats_routes() -> actix_web::Scope {
    web::scope("/stats")
        .route("", web::get().to(StatsApi::get_stats))
        .route("/", web::get().to(StatsApi::get_stats))
}
