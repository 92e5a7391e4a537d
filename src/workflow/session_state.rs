//! 会话状态机
//!
//! 整个进程只存在一个门户会话，状态由 SessionManager 独占修改

use std::fmt;

/// 门户会话状态
///
/// 状态流转：`Unauthenticated → ChallengeIssued → Authenticated`，
/// 任何远程操作失败都会进入 `Failed`，只有 `refresh_challenge` 能恢复
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 未认证（初始状态）
    Unauthenticated,
    /// 已签发挑战，等待提交凭据
    ChallengeIssued,
    /// 登录成功，可以抓取考勤
    Authenticated,
    /// 上一次操作失败，需要刷新挑战后才能继续
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Unauthenticated => "未认证",
            SessionState::ChallengeIssued => "已签发挑战",
            SessionState::Authenticated => "已认证",
            SessionState::Failed => "已失效",
        };
        write!(f, "{}", label)
    }
}
