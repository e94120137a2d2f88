// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site_profile::SiteProfile;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 会话错误类型
#[derive(Error, Debug)]
pub enum SessionError {
    /// 浏览器会话获取失败，致命，不重试
    #[error("driver init failed: {0}")]
    DriverInit(String),
    /// 交互步骤的目标元素始终未出现
    #[error("interaction step failed: no element matched `{selector}`")]
    Interaction { selector: String },
    /// 等待超时
    #[error("wait timed out")]
    Timeout,
    /// 无效选择器
    #[error("invalid selector: {0}")]
    Selector(String),
    /// 脚本执行失败
    #[error("script evaluation failed: {0}")]
    Script(String),
    /// 导航失败
    #[error("navigation failed: {0}")]
    Navigation(String),
    /// 其他错误
    #[error("browser error: {0}")]
    Other(String),
}

/// 浏览器会话能力
///
/// 爬取核心依赖的唯一外部接口。一次爬取独占一个会话，
/// 返回前必须释放。所有等待都有各自的超时上界。
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 导航到指定URL
    async fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// 等待文档就绪（readyState == complete），超时返回 `Timeout`
    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), SessionError>;

    /// 等待选择器至少命中一个元素，超时返回 `Timeout`
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), SessionError>;

    /// 执行脚本并返回其值
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, SessionError>;

    /// 点击第一个命中选择器的元素
    async fn click(&self, selector: &str) -> Result<(), SessionError>;

    /// 向第一个命中选择器的元素输入文本
    async fn type_text(&self, selector: &str, text: &str) -> Result<(), SessionError>;

    /// 在第一个命中选择器的元素上回车
    async fn press_enter(&self, selector: &str) -> Result<(), SessionError>;

    /// 统计选择器命中的元素数量
    async fn count(&self, selector: &str) -> Result<usize, SessionError>;

    /// 读取选择器命中的所有元素的某个属性值
    async fn attribute_values(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Vec<Option<String>>, SessionError>;

    /// 当前页面的序列化标记
    async fn content(&self) -> Result<String, SessionError>;

    /// 当前页面截图（PNG字节）
    async fn screenshot(&self) -> Result<Vec<u8>, SessionError>;

    /// 释放会话；在每条退出路径上都必须调用
    async fn close(&self) -> Result<(), SessionError>;
}

/// 会话工厂
///
/// 为一次爬取获取一个独占会话；获取失败映射为 `DriverInit`
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn acquire(&self, profile: &SiteProfile) -> Result<Box<dyn BrowserSession>, SessionError>;
}
