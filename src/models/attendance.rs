//! 考勤数据模型

use serde::Deserialize;

/// 从页面抓取的一行原始数据
///
/// `cells` 为各单元格去除首尾空白后的文本，`html` 为整行的原始标记
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    pub cells: Vec<String>,
    #[serde(default)]
    pub html: String,
}

impl RawRow {
    /// 仅用单元格文本构造一行（html 留空）
    pub fn from_cells(cells: Vec<String>) -> Self {
        Self {
            cells,
            html: String::new(),
        }
    }
}

/// 单门课程的考勤记录
///
/// 每次抓取时创建，不跨请求持久化
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    /// 课程代码
    pub course_code: String,
    /// 课程描述
    pub description: String,
    /// 总学时
    pub max_hours: u32,
    /// 已出勤学时
    pub attended_hours: u32,
    /// 原始行标记
    pub raw_row_markup: String,
    /// 裕量计算结果
    pub margin: super::Margin,
}

impl AttendanceRecord {
    /// 当前出勤百分比（保留两位小数）
    ///
    /// 提取器保证 `max_hours > 0`
    pub fn percentage_display(&self) -> String {
        format!(
            "{:.2}",
            f64::from(self.attended_hours) / f64::from(self.max_hours) * 100.0
        )
    }
}
