//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 管理应用生命周期：启动浏览器、建立唯一的门户会话、
//! 挂起 HTTP 服务，并决定哪些失败是致命的。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (生命周期)
//!     ↓
//! api (HTTP 接入)
//!     ↓
//! workflow::SessionManager (状态机 + 串行化)
//!     ↓
//! services (能力层：challenge_store / margin / extractor)
//!     ↓
//! infrastructure (基础设施：PortalDriver)
//! ```

pub mod app;

pub use app::App;
