//! 出勤裕量计算 - 业务能力层
//!
//! 纯函数：由 (已出勤学时, 总学时) 推导裕量，无副作用
//!
//! 阈值约定：
//! - 出勤率高于 76% 时，计算还能缺勤多少学时而不跌破 76%
//! - 出勤率低于 75% 时，计算须连续出勤多少学时才能回到 75%
//! - [75, 76] 区间视为稳定区间，不做搜索；76 整点并入稳定区间

use crate::error::MarginError;
use crate::models::{Margin, MarginDirection};

/// 上阈值：可缺勤分支不得跌破的百分比
const UPPER_THRESHOLD: f64 = 76.0;

/// 下阈值：须补足分支要达到的百分比
const LOWER_THRESHOLD: f64 = 75.0;

/// 计算单门课程的出勤裕量
///
/// # 参数
/// - `attended`: 已出勤学时
/// - `total`: 总学时，必须大于 0
///
/// # 返回
/// `total == 0` 时返回 `MarginError::DivisionByZero`，否则返回裕量
pub fn margin(attended: u32, total: u32) -> Result<Margin, MarginError> {
    if total == 0 {
        return Err(MarginError::DivisionByZero { attended });
    }

    let initial = percentage(attended, total);

    if initial > UPPER_THRESHOLD {
        // attended/(total+n) 随 n 严格递减，首个 ≤76 的 n 唯一且 n ≥ 1
        let mut n: u32 = 0;
        while percentage(attended, total + n) > UPPER_THRESHOLD {
            n += 1;
        }
        let hours = n - 1;
        Ok(Margin {
            hours,
            direction: MarginDirection::CanMiss,
            message: format!("You can miss {} hours to stay above 76%.", hours),
            recomputed_percentage: percentage(attended, total + hours),
        })
    } else if initial >= LOWER_THRESHOLD {
        // 稳定区间：不搜索，消息原样报告当前出勤率
        Ok(Margin {
            hours: 0,
            direction: MarginDirection::Stable,
            message: format!("Your attendance is stable at {:.2}%.", initial),
            recomputed_percentage: initial,
        })
    } else {
        // (attended+n)/(total+n) 随 n 严格递增趋向 1，attended < total 时必然终止
        let mut n: u32 = 0;
        while percentage(attended + n, total + n) < LOWER_THRESHOLD {
            n += 1;
        }
        Ok(Margin {
            hours: n,
            direction: MarginDirection::MustAttend,
            message: format!("You need to attend {} hours to reach 75%.", n),
            recomputed_percentage: percentage(attended + n, total + n),
        })
    }
}

fn percentage(attended: u32, total: u32) -> f64 {
    f64::from(attended) / f64::from(total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_miss_scenario() {
        // 80/100 = 80%：n=5 时 8000/105 ≈ 76.19 仍在线上，n=6 时跌破
        let m = margin(80, 100).unwrap();
        assert_eq!(m.direction, MarginDirection::CanMiss);
        assert_eq!(m.hours, 5);
        assert!(m.recomputed_percentage > UPPER_THRESHOLD);
        assert_eq!(m.message, "You can miss 5 hours to stay above 76%.");
    }

    #[test]
    fn test_must_attend_scenario() {
        // 60/100 = 60%：需要连续出勤 60 学时，120/160 = 75%
        let m = margin(60, 100).unwrap();
        assert_eq!(m.direction, MarginDirection::MustAttend);
        assert_eq!(m.hours, 60);
        assert_eq!(m.recomputed_percentage, 75.0);
    }

    #[test]
    fn test_stable_scenario() {
        let m = margin(75, 100).unwrap();
        assert_eq!(m.direction, MarginDirection::Stable);
        assert_eq!(m.hours, 0);
        assert_eq!(m.recomputed_percentage, 75.0);
        assert_eq!(m.message, "Your attendance is stable at 75.00%.");
    }

    #[test]
    fn test_division_by_zero() {
        let err = margin(10, 0).unwrap_err();
        assert!(matches!(err, MarginError::DivisionByZero { attended: 10 }));
    }

    #[test]
    fn test_exact_upper_boundary_is_stable() {
        // 76 整点并入稳定区间，hours 永远不会为负
        for (attended, total) in [(76, 100), (19, 25), (38, 50)] {
            let m = margin(attended, total).unwrap();
            assert_eq!(m.direction, MarginDirection::Stable, "{}/{}", attended, total);
            assert_eq!(m.hours, 0);
        }
    }

    #[test]
    fn test_just_above_upper_boundary() {
        // 77/100 = 77%：n=1 时 7700/101 ≈ 76.24，n=2 时 ≈ 75.49
        let m = margin(77, 100).unwrap();
        assert_eq!(m.direction, MarginDirection::CanMiss);
        assert_eq!(m.hours, 1);
    }

    #[test]
    fn test_full_attendance() {
        let m = margin(40, 40).unwrap();
        assert_eq!(m.direction, MarginDirection::CanMiss);
        // 40/(40+h) > 76% 要求 40+h ≤ 52，h = 12
        assert_eq!(m.hours, 12);
    }

    #[test]
    fn test_zero_attendance() {
        // 0/30：n/(30+n) ≥ 75% 首次成立于 n = 90
        let m = margin(0, 30).unwrap();
        assert_eq!(m.direction, MarginDirection::MustAttend);
        assert_eq!(m.hours, 90);
    }

    #[test]
    fn test_threshold_side_property() {
        // 对所有合理输入：裕量点落在方向所指的阈值一侧，且恰好是首个越界点
        for total in 1..=120u32 {
            for attended in 0..=total {
                let m = margin(attended, total).unwrap();
                match m.direction {
                    MarginDirection::CanMiss => {
                        assert!(
                            percentage(attended, total + m.hours) > UPPER_THRESHOLD,
                            "{}/{}: hours={} 应仍在 76% 之上",
                            attended,
                            total,
                            m.hours
                        );
                        assert!(
                            percentage(attended, total + m.hours + 1) <= UPPER_THRESHOLD,
                            "{}/{}: hours+1 应跌破 76%",
                            attended,
                            total
                        );
                    }
                    MarginDirection::MustAttend => {
                        assert!(
                            percentage(attended + m.hours, total + m.hours) >= LOWER_THRESHOLD
                        );
                        if m.hours > 0 {
                            assert!(
                                percentage(attended + m.hours - 1, total + m.hours - 1)
                                    < LOWER_THRESHOLD
                            );
                        }
                    }
                    MarginDirection::Stable => {
                        assert_eq!(m.hours, 0);
                        assert!(m.recomputed_percentage >= LOWER_THRESHOLD);
                        assert!(m.recomputed_percentage <= UPPER_THRESHOLD);
                    }
                }
            }
        }
    }

    #[test]
    fn test_attended_beyond_total_still_terminates() {
        // 误用输入（attended > total）时可缺勤搜索依然单调收敛
        let m = margin(150, 100).unwrap();
        assert_eq!(m.direction, MarginDirection::CanMiss);
        assert!(percentage(150, 100 + m.hours) > UPPER_THRESHOLD);
    }
}
