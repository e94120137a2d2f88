// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、浏览器、调试存档和站点目录等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 调试存档配置
    pub artifacts: ArtifactSettings,
    /// 站点目录配置
    #[serde(default)]
    pub sites: SiteSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 浏览器配置设置
///
/// 部署相关的值（二进制路径、代理凭据、UA）全部从这里提供，
/// 从不写进代码
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 是否无头运行
    pub headless: bool,
    /// Chrome 二进制路径（缺省时按PATH探测）
    pub chrome_binary: Option<String>,
    /// 用户代理
    pub user_agent: String,
    /// 代理服务器URL（可选）
    pub proxy: Option<String>,
    /// 窗口宽度
    pub window_width: u32,
    /// 窗口高度
    pub window_height: u32,
    /// 单个浏览器请求的超时时间（秒）
    pub request_timeout: u64,
}

/// 调试存档配置设置
#[derive(Debug, Deserialize)]
pub struct ArtifactSettings {
    /// 是否捕获调试存档
    pub enabled: bool,
    /// 存档目录
    pub dir: String,
}

/// 站点目录配置设置
#[derive(Debug, Default, Deserialize)]
pub struct SiteSettings {
    /// 额外YAML站点画像的目录（可选）
    pub profile_dir: Option<String>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default database settings
            .set_default("database.url", "sqlite://stylescout.db?mode=rwc")?
            // Default browser settings
            .set_default("browser.headless", true)?
            .set_default(
                "browser.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )?
            .set_default("browser.window_width", 1920)?
            .set_default("browser.window_height", 1080)?
            .set_default("browser.request_timeout", 90)?
            // Default artifact settings
            .set_default("artifacts.enabled", true)?
            .set_default("artifacts.dir", "debug")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("STYLESCOUT").separator("__"));

        builder.build()?.try_deserialize()
    }
}
