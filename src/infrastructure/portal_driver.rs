//! 门户页面驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"操作远程页面"的能力：
//! 导航、元素截图、填表、点击、抓取表格行。
//! 上层只依赖能力的成功/失败信号，不接触 chromiumoxide 类型。

use std::future::Future;

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::RawRow;

/// 远程页面操作能力
///
/// 会话状态机只通过该 trait 驱动远程页面，测试中可替换为假驱动
pub trait PortalDriver {
    /// 导航到指定 URL 并等待页面加载完成
    fn navigate(&self, url: &str) -> impl Future<Output = AppResult<()>> + Send;

    /// 截取指定元素的 JPEG 图片
    fn capture_element(&self, selector: &str) -> impl Future<Output = AppResult<Vec<u8>>> + Send;

    /// 向指定输入框填写文本
    fn fill(&self, selector: &str, text: &str) -> impl Future<Output = AppResult<()>> + Send;

    /// 点击指定元素
    fn click(&self, selector: &str) -> impl Future<Output = AppResult<()>> + Send;

    /// 抓取指定表格的所有行
    fn extract_rows(
        &self,
        table_selector: &str,
    ) -> impl Future<Output = AppResult<Vec<RawRow>>> + Send;
}

/// 基于 chromiumoxide 的驱动实现
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 把 CDP 错误映射到应用错误
/// - 不认识会话状态，也不处理业务流程
pub struct ChromiumDriver {
    page: Page,
}

impl ChromiumDriver {
    /// 创建新的页面驱动
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行 JS 代码并返回 JSON 结果
    async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self
            .page
            .evaluate(js_code.into())
            .await
            .map_err(|e| AppError::script_failed(e))?;
        let json_value = result
            .into_value()
            .map_err(|e| AppError::script_failed(e))?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value =
            serde_json::from_value(json_value).map_err(|e| AppError::script_failed(e))?;
        Ok(typed_value)
    }
}

impl PortalDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> AppResult<()> {
        debug!("导航到: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::navigation_failed(url, e))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| AppError::navigation_failed(url, e))?;
        Ok(())
    }

    async fn capture_element(&self, selector: &str) -> AppResult<Vec<u8>> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| AppError::element_not_found(selector))?;
        let bytes = element
            .screenshot(CaptureScreenshotFormat::Jpeg)
            .await
            .map_err(|e| AppError::screenshot_failed(selector, e))?;
        debug!("已截取元素 {} ({} 字节)", selector, bytes.len());
        Ok(bytes)
    }

    async fn fill(&self, selector: &str, text: &str) -> AppResult<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| AppError::fill_failed(selector, e))?;
        element
            .click()
            .await
            .map_err(|e| AppError::fill_failed(selector, e))?;
        element
            .type_str(text)
            .await
            .map_err(|e| AppError::fill_failed(selector, e))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> AppResult<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| AppError::click_failed(selector, e))?;
        element
            .click()
            .await
            .map_err(|e| AppError::click_failed(selector, e))?;
        Ok(())
    }

    async fn extract_rows(&self, table_selector: &str) -> AppResult<Vec<RawRow>> {
        // 表格缺失是独立的错误信号，先于脚本执行判定
        self.page
            .find_element(table_selector)
            .await
            .map_err(|_| AppError::element_not_found(table_selector))?;

        let js_code = format!(
            r#"Array.from(document.querySelectorAll("{} tr")).map(tr => ({{
                cells: Array.from(tr.querySelectorAll("td")).map(td => td.innerText.trim()),
                html: tr.outerHTML
            }}))"#,
            table_selector
        );

        let rows: Vec<RawRow> = self.eval_as(js_code).await?;
        debug!("从 {} 抓取到 {} 行", table_selector, rows.len());
        Ok(rows)
    }
}
