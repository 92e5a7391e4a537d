//! 应用生命周期 - 编排层
//!
//! 启动浏览器、初始化会话、挂起 HTTP 服务。
//! 启动阶段无法获取自动化资源（浏览器起不来、门户不可达）是致命错误，
//! 直接中止进程；运行阶段的操作失败只作为类型化错误返回给请求方。

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use chromiumoxide::Browser;
use tracing::info;

use crate::api;
use crate::browser::launch_headless_browser;
use crate::config::Config;
use crate::infrastructure::ChromiumDriver;
use crate::services::ChallengeStore;
use crate::workflow::SessionManager;

/// 应用主结构
pub struct App {
    config: Config,
    session: Arc<SessionManager<ChromiumDriver>>,
    /// 浏览器进程句柄，保持存活至服务退出
    _browser: Browser,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 启动浏览器并建立会话
        let (browser, page) = launch_headless_browser(&config).await?;
        let driver = ChromiumDriver::new(page);
        let challenges = Arc::new(ChallengeStore::new());
        let session = Arc::new(SessionManager::new(driver, challenges, &config));

        // 首次导航 + 首个挑战；失败即中止启动
        session.initialize().await?;

        Ok(Self {
            config,
            session,
            _browser: browser,
        })
    }

    /// 运行 HTTP 服务直到进程结束
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let app = api::router(self.session.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🌐 服务已启动: http://localhost:{}", self.config.port);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 考勤门户桥接模式");
    info!("🎯 门户登录页: {}", config.portal_login_url);
    info!("⏱️ 操作超时: {} 毫秒", config.operation_timeout_millis);
    info!("{}", "=".repeat(60));
}
