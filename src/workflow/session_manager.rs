//! 会话管理 - 流程层
//!
//! 核心职责：串行化所有针对远程门户页面的操作
//!
//! 远程页面是单个可变的"游标"：任何导航或修改都会使并发操作对页面
//! 状态的假设失效，所以全部操作都经过同一把锁，严格按到达顺序执行。
//! tokio 的 Mutex 按 FIFO 排队等待者，天然满足公平性要求。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::PortalDriver;
use crate::models::AttendanceRecord;
use crate::services::extractor;
use crate::services::ChallengeStore;
use crate::workflow::SessionState;

/// 锁内共享的会话核心：驱动与状态永远一起被独占
struct SessionCore<D> {
    driver: D,
    state: SessionState,
}

/// 会话管理器
///
/// 职责：
/// - 独占远程页面驱动，公开 {initialize, refresh_challenge,
///   submit_credentials, fetch_attendance} 四个操作
/// - 维护会话状态机
/// - 驱动挑战存储与考勤提取
pub struct SessionManager<D> {
    core: Mutex<SessionCore<D>>,
    challenges: Arc<ChallengeStore>,
    config: Config,
    settle: Duration,
    operation_timeout: Duration,
}

impl<D: PortalDriver> SessionManager<D> {
    /// 创建新的会话管理器（初始状态为未认证）
    pub fn new(driver: D, challenges: Arc<ChallengeStore>, config: &Config) -> Self {
        Self {
            core: Mutex::new(SessionCore {
                driver,
                state: SessionState::Unauthenticated,
            }),
            challenges,
            config: config.clone(),
            settle: Duration::from_millis(config.settle_millis),
            operation_timeout: Duration::from_millis(config.operation_timeout_millis),
        }
    }

    /// 当前会话状态
    pub async fn state(&self) -> SessionState {
        self.core.lock().await.state
    }

    /// 挑战存储的引用（供 HTTP 层直接读取图片）
    pub fn challenge_store(&self) -> &ChallengeStore {
        &self.challenges
    }

    /// 初始化会话：导航到登录页并捕获首个挑战
    ///
    /// 启动阶段调用，失败由调用方视为致命错误
    pub async fn initialize(&self) -> AppResult<()> {
        let mut core = self.core.lock().await;
        info!("🚀 正在初始化门户会话...");

        match self.refresh_challenge_locked(&mut core).await {
            Ok(generation) => {
                info!("✅ 会话初始化完成 (挑战代次: {})", generation);
                Ok(())
            }
            Err(e) => {
                core.state = SessionState::Failed;
                error!("❌ 会话初始化失败: {}", e);
                Err(e)
            }
        }
    }

    /// 刷新挑战：重新导航到登录页并重新捕获挑战图片
    ///
    /// 任何状态下都允许调用，成功后状态总是回到 `ChallengeIssued`，
    /// 这是 `Failed` 状态唯一的恢复路径
    pub async fn refresh_challenge(&self) -> AppResult<u64> {
        let mut core = self.core.lock().await;

        match self.refresh_challenge_locked(&mut core).await {
            Ok(generation) => {
                info!("🔄 挑战图片已刷新 (代次: {})", generation);
                Ok(generation)
            }
            Err(e) => {
                core.state = SessionState::Failed;
                warn!("⚠️ 刷新挑战失败: {}", e);
                Err(e)
            }
        }
    }

    /// 提交登录凭据
    ///
    /// 仅在 `ChallengeIssued` 状态下有效，其余状态直接返回状态机错误，
    /// 不触发任何远程动作，也不改变状态
    pub async fn submit_credentials(
        &self,
        netid: &str,
        password: &str,
        challenge_response: &str,
    ) -> AppResult<()> {
        let mut core = self.core.lock().await;

        if core.state != SessionState::ChallengeIssued {
            return Err(AppError::invalid_state("submit_credentials", core.state));
        }

        info!("🔐 正在提交登录表单 (NetID: {})...", netid);

        match self
            .submit_locked(&mut core, netid, password, challenge_response)
            .await
        {
            Ok(()) => {
                core.state = SessionState::Authenticated;
                info!("✅ 登录表单已提交，会话进入认证状态");
                Ok(())
            }
            Err(e) => {
                core.state = SessionState::Failed;
                error!("❌ 提交登录表单失败: {}", e);
                Err(e)
            }
        }
    }

    /// 抓取考勤记录并附加裕量计算结果
    ///
    /// 仅在 `Authenticated` 状态下有效
    pub async fn fetch_attendance(&self) -> AppResult<Vec<AttendanceRecord>> {
        let mut core = self.core.lock().await;

        if core.state != SessionState::Authenticated {
            return Err(AppError::invalid_state("fetch_attendance", core.state));
        }

        info!("📋 正在抓取考勤报表...");

        match self.fetch_locked(&mut core).await {
            Ok(records) => {
                info!("📊 抓取到 {} 门课程的考勤记录", records.len());
                Ok(records)
            }
            Err(e) => {
                core.state = SessionState::Failed;
                error!("❌ 抓取考勤失败: {}", e);
                Err(e)
            }
        }
    }

    // ========== 锁内流程 ==========

    async fn refresh_challenge_locked(&self, core: &mut SessionCore<D>) -> AppResult<u64> {
        self.guarded(
            "refresh_challenge",
            core.driver.navigate(&self.config.portal_login_url),
        )
        .await?;

        let image = self
            .guarded(
                "refresh_challenge",
                core.driver.capture_element(&self.config.captcha_selector),
            )
            .await?;

        let generation = self.challenges.put(image).await;
        core.state = SessionState::ChallengeIssued;
        Ok(generation)
    }

    async fn submit_locked(
        &self,
        core: &mut SessionCore<D>,
        netid: &str,
        password: &str,
        challenge_response: &str,
    ) -> AppResult<()> {
        self.guarded(
            "submit_credentials",
            core.driver.fill(&self.config.netid_selector, netid),
        )
        .await?;
        self.guarded(
            "submit_credentials",
            core.driver.fill(&self.config.password_selector, password),
        )
        .await?;
        self.guarded(
            "submit_credentials",
            core.driver
                .fill(&self.config.captcha_input_selector, challenge_response),
        )
        .await?;
        self.guarded(
            "submit_credentials",
            core.driver.click(&self.config.submit_button_selector),
        )
        .await?;

        // 门户在点击后异步跳转，固定等待一个 settle 间隔
        sleep(self.settle).await;
        Ok(())
    }

    async fn fetch_locked(&self, core: &mut SessionCore<D>) -> AppResult<Vec<AttendanceRecord>> {
        self.guarded(
            "fetch_attendance",
            core.driver.navigate(&self.config.attendance_url),
        )
        .await?;

        sleep(self.settle).await;

        let rows = self
            .guarded(
                "fetch_attendance",
                core.driver
                    .extract_rows(&self.config.attendance_table_selector),
            )
            .await?;

        Ok(extractor::extract(&rows))
    }

    /// 给单个远程步骤加上超时，防止门户无响应时永久挂起
    async fn guarded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::timed_out(
                operation,
                self.operation_timeout.as_millis() as u64,
            )),
        }
    }
}
