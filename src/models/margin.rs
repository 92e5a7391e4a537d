//! 出勤裕量模型

/// 裕量方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginDirection {
    /// 出勤率高于上阈值，还可以缺勤若干学时
    CanMiss,
    /// 出勤率低于下阈值，必须补足若干学时
    MustAttend,
    /// 位于 [75, 76] 稳定区间内
    Stable,
}

/// 单门课程的出勤裕量
///
/// 仅由 (已出勤学时, 总学时) 推导，无任何隐藏状态
#[derive(Debug, Clone, PartialEq)]
pub struct Margin {
    /// 可缺勤 / 须补足的学时数
    pub hours: u32,
    /// 裕量方向
    pub direction: MarginDirection,
    /// 面向学生的说明文本
    pub message: String,
    /// 在裕量点重新计算的出勤百分比
    pub recomputed_percentage: f64,
}

impl Margin {
    /// 模板渲染用的 CSS 类名
    pub fn direction_class(&self) -> &'static str {
        match self.direction {
            MarginDirection::CanMiss => "can-miss",
            MarginDirection::MustAttend => "must-attend",
            MarginDirection::Stable => "stable",
        }
    }

    /// 裕量点百分比（保留两位小数）
    pub fn recomputed_display(&self) -> String {
        format!("{:.2}", self.recomputed_percentage)
    }
}
