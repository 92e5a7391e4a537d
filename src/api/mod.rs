//! HTTP 接入层
//!
//! 对外暴露四个端点：登录页、挑战图片、刷新挑战、提交登录

pub mod error;
pub mod routes;
pub mod views;

pub use error::WebError;
pub use routes::{router, LoginForm};
