// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Placeholder substituted with the URL-encoded query in `search_url_template`.
pub const QUERY_PLACEHOLDER: &str = "{query}";

fn default_ready_timeout_ms() -> u64 {
    20_000
}

fn default_content_timeout_ms() -> u64 {
    20_000
}

fn default_step_timeout_ms() -> u64 {
    10_000
}

/// 站点画像
///
/// 描述如何在一个零售站点上执行搜索并识别其商品链接标记。
/// 每个目标站点创建一次，创建后不可变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    /// 站点标识（注册表键）
    pub name: String,
    /// 站点源，用于解析相对链接
    pub origin: String,
    /// 搜索入口URL模板，包含 `{query}` 占位符；
    /// 配置了交互步骤时作为起始页直接打开
    pub search_url_template: String,
    /// 无直接查询URL的站点的搜索交互步骤（点击、输入、提交）
    #[serde(default)]
    pub interaction_steps: Vec<InteractionStep>,
    /// 商品链接锚元素的候选选择器，按顺序尝试，取第一个有命中的
    pub link_selectors: Vec<String>,
    /// 可接受的URL路径子串，至少命中一个才保留
    pub allow_substrings: Vec<String>,
    /// 含有任一子串的URL被丢弃（例如分页参数）
    #[serde(default)]
    pub exclude_substrings: Vec<String>,
    /// 以任一后缀结尾的URL被丢弃（例如目录页自身）
    #[serde(default)]
    pub exclude_suffixes: Vec<String>,
    /// 反自动化挑战的指示选择器
    #[serde(default)]
    pub block_selectors: Vec<String>,
    /// 渲染后标记中的错误页指示子串
    #[serde(default)]
    pub block_markers: Vec<String>,
    /// 商品栅格选择器，滚动前尽力等待其出现
    #[serde(default)]
    pub content_selector: Option<String>,
    /// 页面就绪等待超时（毫秒）
    #[serde(default = "default_ready_timeout_ms")]
    pub ready_timeout_ms: u64,
    /// 商品栅格等待超时（毫秒）
    #[serde(default = "default_content_timeout_ms")]
    pub content_timeout_ms: u64,
    /// 滚动策略
    pub scroll: ScrollPolicy,
}

/// 滚动策略
///
/// 控制懒加载内容的逐步展开
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollPolicy {
    /// 最大滚动次数，防止合成内容持续增长导致死循环
    pub max_iterations: u32,
    /// 每次滚动后的稳定等待（毫秒）
    pub settle_ms: u64,
}

impl ScrollPolicy {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// 搜索交互步骤
///
/// 每一步携带自己的候选选择器链和出现等待超时
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InteractionStep {
    /// 点击元素（例如搜索图标）
    Click {
        selectors: Vec<String>,
        #[serde(default = "default_step_timeout_ms")]
        timeout_ms: u64,
    },
    /// 将原始查询词输入到元素中（不做URL编码）
    TypeQuery {
        selectors: Vec<String>,
        #[serde(default = "default_step_timeout_ms")]
        timeout_ms: u64,
    },
    /// 在元素上回车提交
    Submit {
        selectors: Vec<String>,
        #[serde(default = "default_step_timeout_ms")]
        timeout_ms: u64,
    },
}

impl InteractionStep {
    pub fn selectors(&self) -> &[String] {
        match self {
            Self::Click { selectors, .. }
            | Self::TypeQuery { selectors, .. }
            | Self::Submit { selectors, .. } => selectors,
        }
    }

    pub fn timeout(&self) -> Duration {
        let ms = match self {
            Self::Click { timeout_ms, .. }
            | Self::TypeQuery { timeout_ms, .. }
            | Self::Submit { timeout_ms, .. } => *timeout_ms,
        };
        Duration::from_millis(ms)
    }
}

impl SiteProfile {
    /// Parse the configured origin.
    pub fn origin_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.origin)
    }

    /// Interpolate the URL-encoded query into the search template.
    pub fn search_url(&self, query: &str) -> String {
        self.search_url_template
            .replace(QUERY_PLACEHOLDER, &urlencoding::encode(query))
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_millis(self.content_timeout_ms)
    }

    /// Load a profile from a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        let profile = SiteProfile {
            name: "shop".to_string(),
            origin: "https://shop.test".to_string(),
            search_url_template: "https://shop.test/search?q={query}".to_string(),
            interaction_steps: vec![],
            link_selectors: vec!["a".to_string()],
            allow_substrings: vec!["/product/".to_string()],
            exclude_substrings: vec![],
            exclude_suffixes: vec![],
            block_selectors: vec![],
            block_markers: vec![],
            content_selector: None,
            ready_timeout_ms: 1000,
            content_timeout_ms: 1000,
            scroll: ScrollPolicy {
                max_iterations: 3,
                settle_ms: 0,
            },
        };

        assert_eq!(
            profile.search_url("летнее платье"),
            "https://shop.test/search?q=%D0%BB%D0%B5%D1%82%D0%BD%D0%B5%D0%B5%20%D0%BF%D0%BB%D0%B0%D1%82%D1%8C%D0%B5"
        );
    }

    #[test]
    fn test_profile_from_yaml_with_defaults() {
        let yaml = r#"
name: shop
origin: "https://shop.test"
search_url_template: "https://shop.test/search?q={query}"
link_selectors:
  - "a[href*='/product/']"
allow_substrings:
  - "/product/"
scroll:
  max_iterations: 5
  settle_ms: 2000
"#;
        let profile = SiteProfile::from_yaml(yaml).unwrap();
        assert_eq!(profile.name, "shop");
        assert!(profile.interaction_steps.is_empty());
        assert_eq!(profile.ready_timeout_ms, 20_000);
        assert_eq!(profile.scroll.max_iterations, 5);
    }

    #[test]
    fn test_interaction_step_yaml_tagging() {
        let yaml = r#"
action: type_query
selectors:
  - "input.search"
  - "#sidebar_search_input"
"#;
        let step: InteractionStep = serde_yaml::from_str(yaml).unwrap();
        match &step {
            InteractionStep::TypeQuery { selectors, .. } => assert_eq!(selectors.len(), 2),
            other => panic!("unexpected step: {:?}", other),
        }
        assert_eq!(step.timeout(), Duration::from_millis(10_000));
    }
}
