//! 统一响应体
//!
//! 业务失败通过响应体中的 `code` 表达，HTTP 状态码默认保持 200

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AppError, ErrorCode};

/// 对外业务错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    /// 创建业务错误 (HTTP 200)
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: 200,
        }
    }

    /// 指定 HTTP 状态码
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::new(err.error_code(), err.to_string()).with_status(err.status_code())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        let body = ApiResponse::<()> {
            code: self.code,
            message: self.message,
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

/// 响应信封 `{ code, message, data }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: ErrorCode,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: ErrorCode::Success,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 无数据的成功响应
    pub fn empty() -> Self {
        Self {
            code: ErrorCode::Success,
            message: "success".to_string(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
