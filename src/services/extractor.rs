//! 考勤行提取 - 业务能力层
//!
//! 将抓取到的原始行解析为结构化记录，并逐行附加裕量计算结果。
//! 列数不符的行（表头、分隔行、嵌套布局）静默跳过，不视为错误。

use tracing::{debug, warn};

use crate::models::{AttendanceRecord, RawRow};
use crate::services::margin::margin;

/// 考勤表的期望列数
const EXPECTED_COLUMNS: usize = 8;

/// 课程代码所在列
const COURSE_CODE_CELL: usize = 0;
/// 课程描述所在列
const DESCRIPTION_CELL: usize = 1;
/// 总学时所在列
const TOTAL_HOURS_CELL: usize = 2;
/// 已出勤学时所在列
const ATTENDED_HOURS_CELL: usize = 3;

/// 提取考勤记录
///
/// # 参数
/// - `raw_rows`: 抓取到的原始行
///
/// # 返回
/// 返回结构化记录列表，长度等于合法行的数量
pub fn extract(raw_rows: &[RawRow]) -> Vec<AttendanceRecord> {
    let mut records = Vec::with_capacity(raw_rows.len());

    for row in raw_rows {
        if row.cells.len() != EXPECTED_COLUMNS {
            debug!(
                "跳过 {} 列的行（期望 {} 列）",
                row.cells.len(),
                EXPECTED_COLUMNS
            );
            continue;
        }

        let max_hours = parse_hours(&row.cells[TOTAL_HOURS_CELL]);
        let attended_hours = parse_hours(&row.cells[ATTENDED_HOURS_CELL]);

        // 总学时为 0 的行与列数不符的行同等对待，不触发裕量计算
        if max_hours == 0 {
            warn!(
                "跳过总学时为 0 的行: {}",
                row.cells[COURSE_CODE_CELL]
            );
            continue;
        }

        let margin = match margin(attended_hours, max_hours) {
            Ok(m) => m,
            Err(e) => {
                warn!("裕量计算失败，跳过行: {}", e);
                continue;
            }
        };

        records.push(AttendanceRecord {
            course_code: row.cells[COURSE_CODE_CELL].clone(),
            description: row.cells[DESCRIPTION_CELL].clone(),
            max_hours,
            attended_hours,
            raw_row_markup: row.html.clone(),
            margin,
        });
    }

    records
}

/// 解析学时文本，无法解析时按 0 处理（永不报错）
fn parse_hours(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarginDirection;

    fn row(cells: &[&str]) -> RawRow {
        RawRow::from_cells(cells.iter().map(|c| c.to_string()).collect())
    }

    fn eight_column_row(code: &str, total: &str, attended: &str) -> RawRow {
        row(&[code, "Some Course", total, attended, "5", "80.0", "0", "OK"])
    }

    #[test]
    fn test_only_eight_column_rows_are_kept() {
        let rows = vec![
            row(&["CS101", "x", "60", "50", "1", "2", "3"]),
            eight_column_row("CS102", "60", "50"),
            row(&["CS103", "x", "60", "50", "1", "2", "3", "4", "5"]),
            eight_column_row("CS104", "45", "30"),
        ];

        let records = extract(&rows);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].course_code, "CS102");
        assert_eq!(records[1].course_code, "CS104");
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        // 出勤列无法解析 → 按 0 出勤处理，记录保留
        let records = extract(&[eight_column_row("CS201", "60", "n/a")]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attended_hours, 0);
        assert_eq!(records[0].margin.direction, MarginDirection::MustAttend);
    }

    #[test]
    fn test_zero_total_rows_are_skipped() {
        // 总学时列无法解析（按 0 处理）→ 整行跳过，不触发除零
        let rows = vec![
            eight_column_row("CS301", "Total", "50"),
            eight_column_row("CS302", "0", "0"),
            eight_column_row("CS303", "60", "50"),
        ];

        let records = extract(&rows);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].course_code, "CS303");
    }

    #[test]
    fn test_margin_is_attached_per_row() {
        let rows = vec![
            eight_column_row("CS401", "100", "80"),
            eight_column_row("CS402", "100", "60"),
            eight_column_row("CS403", "100", "75"),
        ];

        let records = extract(&rows);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].margin.direction, MarginDirection::CanMiss);
        assert_eq!(records[0].margin.hours, 5);
        assert_eq!(records[1].margin.direction, MarginDirection::MustAttend);
        assert_eq!(records[1].margin.hours, 60);
        assert_eq!(records[2].margin.direction, MarginDirection::Stable);
    }

    #[test]
    fn test_raw_markup_is_preserved() {
        let mut raw = eight_column_row("CS501", "60", "48");
        raw.html = "<tr><td>CS501</td></tr>".to_string();

        let records = extract(&[raw]);

        assert_eq!(records[0].raw_row_markup, "<tr><td>CS501</td></tr>");
    }
}
