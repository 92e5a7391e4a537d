//! # SRM Attendance
//!
//! 一个把 HTTP 请求桥接到 SRM 学生门户会话的 Rust 应用程序，
//! 通过无头浏览器驱动远程页面，并为抓取到的考勤行附加"裕量"指标。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PortalDriver` - 远程页面操作能力（导航 / 截图 / 填表 / 点击 / 抓行）
//! - `ChromiumDriver` - 唯一的 page owner
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不持有页面资源
//! - `ChallengeStore` - 当前挑战图片的唯一槽位
//! - `margin` - 出勤裕量纯函数计算
//! - `extractor` - 原始行 → 结构化考勤记录
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 会话状态机与操作串行化
//! - `SessionState` - `Unauthenticated → ChallengeIssued → Authenticated`
//! - `SessionManager` - 四个串行操作：initialize / refresh_challenge /
//!   submit_credentials / fetch_attendance
//!
//! ### ④ 接入与编排层（Api / Orchestration）
//! - `api/` - axum 路由，把请求翻译成会话操作并渲染模板
//! - `orchestrator/` - 应用生命周期（启动浏览器、挂起服务）
//!
//! ## 模块结构

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use browser::launch_headless_browser;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromiumDriver, PortalDriver};
pub use models::{AttendanceRecord, Margin, MarginDirection, RawRow};
pub use orchestrator::App;
pub use services::{Challenge, ChallengeStore};
pub use workflow::{SessionManager, SessionState};
