//! API 响应与错误码

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 统计查询错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    ServiceUnavailable = 1030,

    // 统计查询错误 3000-3099
    StatsNotFound = 3000,
    StatsQueryFailed = 3001,
}

/// 错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 构建错误响应
pub fn error_response(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    json_response(
        status,
        &ErrorBody {
            code,
            message: message.into(),
        },
    )
}
