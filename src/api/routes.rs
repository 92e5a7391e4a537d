//! HTTP 路由与处理器
//!
//! 薄薄的一层：每个请求最多触发一次会话操作，结果交给模板渲染。
//! 非 POST 访问 POST 路由由 axum 的方法路由自动回以 405。

use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use chrono::{DateTime, Local, Utc};
use serde::Deserialize;

use crate::api::error::WebError;
use crate::api::views::{AttendanceView, LoginView};
use crate::infrastructure::PortalDriver;
use crate::workflow::SessionManager;

/// 登录表单字段
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub netid: String,
    pub password: String,
    pub captcha: String,
}

/// 构建应用路由
pub fn router<D>(session: Arc<SessionManager<D>>) -> Router
where
    D: PortalDriver + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(login_page))
        .route("/captcha.jpg", get(challenge_image::<D>))
        .route("/reload_captcha", post(reload_challenge::<D>))
        .route("/submit_login", post(submit_login::<D>))
        .with_state(session)
}

/// GET / - 渲染登录表单，挑战图片带时间戳防缓存
async fn login_page() -> Result<Html<String>, WebError> {
    let view = LoginView {
        cache_bust: Utc::now().timestamp(),
    };
    Ok(Html(view.render()?))
}

/// GET /captcha.jpg - 返回当前挑战图片，支持条件 GET
async fn challenge_image<D>(
    State(session): State<Arc<SessionManager<D>>>,
    headers: HeaderMap,
) -> Result<Response, WebError>
where
    D: PortalDriver + Send + Sync + 'static,
{
    let challenge = session
        .challenge_store()
        .get()
        .await
        .ok_or(WebError::ChallengeNotReady)?;

    // 秒级精度对比：HTTP 日期本身不携带亚秒
    if let Some(since) = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
    {
        if challenge.captured_at.timestamp() <= since.timestamp() {
            return Ok(StatusCode::NOT_MODIFIED.into_response());
        }
    }

    let last_modified = challenge
        .captured_at
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::LAST_MODIFIED, last_modified),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        challenge.image.clone(),
    )
        .into_response())
}

/// POST /reload_captcha - 刷新挑战图片，成功时返回空 200
async fn reload_challenge<D>(
    State(session): State<Arc<SessionManager<D>>>,
) -> Result<StatusCode, WebError>
where
    D: PortalDriver + Send + Sync + 'static,
{
    session.refresh_challenge().await?;
    Ok(StatusCode::OK)
}

/// POST /submit_login - 提交凭据并渲染带裕量标注的考勤表
async fn submit_login<D>(
    State(session): State<Arc<SessionManager<D>>>,
    Form(form): Form<LoginForm>,
) -> Result<Html<String>, WebError>
where
    D: PortalDriver + Send + Sync + 'static,
{
    session
        .submit_credentials(&form.netid, &form.password, &form.captcha)
        .await?;

    let records = session.fetch_attendance().await?;

    let view = AttendanceView {
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        records,
    };
    Ok(Html(view.render()?))
}
