//! 模板视图模型
//!
//! 渲染只消费结构化的 `AttendanceRecord` / `Margin` 值，
//! 提取与计算核心不掺杂任何展示逻辑

use askama::Template;

use crate::models::AttendanceRecord;

/// 登录页
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginView {
    /// 挑战图片的缓存破坏参数（Unix 时间戳）
    pub cache_bust: i64,
}

/// 考勤报表页
#[derive(Template)]
#[template(path = "attendance.html")]
pub struct AttendanceView {
    /// 报表生成时间
    pub generated_at: String,
    /// 附加了裕量的考勤记录
    pub records: Vec<AttendanceRecord>,
}
