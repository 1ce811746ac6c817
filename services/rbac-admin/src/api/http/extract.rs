//! 请求提取器
//!
//! 解析失败统一返回 `数据格式错误`，保持响应体格式一致

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use panel_errors::ApiError;
use serde::de::DeserializeOwned;
use tracing::debug;

const INVALID_PAYLOAD: &str = "数据格式错误";

/// JSON 请求体
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(error = %rejection, "Rejected request body");
                Err(ApiError::validation(INVALID_PAYLOAD))
            }
        }
    }
}

/// 查询字符串参数
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(error = %rejection, "Rejected query string");
                Err(ApiError::validation(INVALID_PAYLOAD))
            }
        }
    }
}

/// 路径中的数字 ID
pub struct PathId(pub i64);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                debug!(error = %rejection, "Rejected path parameter");
                Err(ApiError::validation(INVALID_PAYLOAD))
            }
        }
    }
}
