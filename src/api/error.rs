//! HTTP 层错误映射
//!
//! 把领域错误翻译成状态码；状态机错误按规约一律以 500 暴露

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::error::AppError;

/// HTTP 层错误
#[derive(Debug, Error)]
pub enum WebError {
    /// 挑战图片尚未捕获过
    #[error("挑战图片尚未就绪")]
    ChallengeNotReady,
    /// 模板渲染失败
    #[error("模板渲染失败: {0}")]
    Render(#[from] askama::Error),
    /// 会话操作失败
    #[error(transparent)]
    App(#[from] AppError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::ChallengeNotReady => StatusCode::NOT_FOUND,
            WebError::Render(_) | WebError::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("请求处理失败: {}", self);
        (status, self.to_string()).into_response()
    }
}
