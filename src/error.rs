use std::fmt;

use crate::workflow::SessionState;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 浏览器相关错误
    Browser(BrowserError),
    /// 会话状态机错误
    Session(SessionError),
    /// 出勤裕量计算错误
    Margin(MarginError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Browser(e) => write!(f, "浏览器错误: {}", e),
            AppError::Session(e) => write!(f, "会话错误: {}", e),
            AppError::Margin(e) => write!(f, "裕量计算错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Browser(e) => Some(e),
            AppError::Session(e) => Some(e),
            AppError::Margin(e) => Some(e),
        }
    }
}

/// 浏览器相关错误
#[derive(Debug)]
pub enum BrowserError {
    /// 浏览器配置失败
    ConfigurationFailed {
        message: String,
    },
    /// 启动无头浏览器失败
    LaunchFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建页面失败
    PageCreationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    NavigationFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 未找到页面元素
    ElementNotFound {
        selector: String,
    },
    /// 截取元素图片失败
    ScreenshotFailed {
        selector: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 填写表单字段失败
    FillFailed {
        selector: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 点击元素失败
    ClickFailed {
        selector: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 执行脚本失败
    ScriptFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::ConfigurationFailed { message } => {
                write!(f, "配置无头浏览器失败: {}", message)
            }
            BrowserError::LaunchFailed { source } => {
                write!(f, "启动无头浏览器失败: {}", source)
            }
            BrowserError::PageCreationFailed { source } => {
                write!(f, "创建页面失败: {}", source)
            }
            BrowserError::NavigationFailed { url, source } => {
                write!(f, "导航到 {} 失败: {}", url, source)
            }
            BrowserError::ElementNotFound { selector } => {
                write!(f, "未找到页面元素: {}", selector)
            }
            BrowserError::ScreenshotFailed { selector, source } => {
                write!(f, "截取元素 {} 失败: {}", selector, source)
            }
            BrowserError::FillFailed { selector, source } => {
                write!(f, "填写表单字段 {} 失败: {}", selector, source)
            }
            BrowserError::ClickFailed { selector, source } => {
                write!(f, "点击元素 {} 失败: {}", selector, source)
            }
            BrowserError::ScriptFailed { source } => {
                write!(f, "执行脚本失败: {}", source)
            }
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::LaunchFailed { source }
            | BrowserError::PageCreationFailed { source }
            | BrowserError::NavigationFailed { source, .. }
            | BrowserError::ScreenshotFailed { source, .. }
            | BrowserError::FillFailed { source, .. }
            | BrowserError::ClickFailed { source, .. }
            | BrowserError::ScriptFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 会话状态机错误
#[derive(Debug)]
pub enum SessionError {
    /// 当前状态不允许执行该操作
    ///
    /// 该错误不会改变会话状态，也不会触发任何远程动作
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    /// 远程操作超时
    OperationTimedOut {
        operation: &'static str,
        timeout_millis: u64,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidState { operation, state } => {
                write!(f, "当前会话状态 ({}) 不允许执行操作 {}", state, operation)
            }
            SessionError::OperationTimedOut {
                operation,
                timeout_millis,
            } => {
                write!(f, "操作 {} 超时 ({} 毫秒)", operation, timeout_millis)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// 出勤裕量计算错误
#[derive(Debug)]
pub enum MarginError {
    /// 总学时为 0，比例无法计算
    DivisionByZero {
        attended: u32,
    },
}

impl fmt::Display for MarginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginError::DivisionByZero { attended } => {
                write!(f, "总学时为 0，无法计算出勤率 (已出勤 {} 学时)", attended)
            }
        }
    }
}

impl std::error::Error for MarginError {}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptFailed {
            source: Box::new(err),
        })
    }
}

impl From<MarginError> for AppError {
    fn from(err: MarginError) -> Self {
        AppError::Margin(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器配置错误
    pub fn browser_configuration_failed(message: impl Into<String>) -> Self {
        AppError::Browser(BrowserError::ConfigurationFailed {
            message: message.into(),
        })
    }

    /// 创建浏览器启动错误
    pub fn launch_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Browser(BrowserError::LaunchFailed {
            source: Box::new(source),
        })
    }

    /// 创建页面创建错误
    pub fn page_creation_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Browser(BrowserError::PageCreationFailed {
            source: Box::new(source),
        })
    }

    /// 创建导航错误
    pub fn navigation_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::NavigationFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建元素缺失错误
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        AppError::Browser(BrowserError::ElementNotFound {
            selector: selector.into(),
        })
    }

    /// 创建元素截图错误
    pub fn screenshot_failed(
        selector: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ScreenshotFailed {
            selector: selector.into(),
            source: Box::new(source),
        })
    }

    /// 创建表单填写错误
    pub fn fill_failed(
        selector: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::FillFailed {
            selector: selector.into(),
            source: Box::new(source),
        })
    }

    /// 创建点击错误
    pub fn click_failed(
        selector: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ClickFailed {
            selector: selector.into(),
            source: Box::new(source),
        })
    }

    /// 创建脚本执行错误
    pub fn script_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Browser(BrowserError::ScriptFailed {
            source: Box::new(source),
        })
    }

    /// 创建状态机错误
    pub fn invalid_state(operation: &'static str, state: SessionState) -> Self {
        AppError::Session(SessionError::InvalidState { operation, state })
    }

    /// 创建操作超时错误
    pub fn timed_out(operation: &'static str, timeout_millis: u64) -> Self {
        AppError::Session(SessionError::OperationTimedOut {
            operation,
            timeout_millis,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
