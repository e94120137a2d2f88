// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product_link::ProductLink;
use serde::{Deserialize, Serialize};

/// 爬取结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    /// 至少提取到一个商品链接
    Success,
    /// 站点返回了反自动化挑战，提取被短路
    Blocked,
    /// 页面就绪等待超时，结果为尽力提取
    TimedOut,
    /// 页面正常但没有提取到任何链接
    Empty,
    /// 内部错误被捕获并映射到此状态
    Error,
}

impl CrawlStatus {
    /// 判断结果是否适合按原样重试
    ///
    /// `Blocked` 需要换用不同的站点策略，不应原样重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Empty | Self::Error)
    }
}

/// 爬取结果
///
/// 一次 (站点画像, 查询) 调用的输出：按首次出现顺序去重后的
/// 商品链接序列，加上结果状态。构造后返回给调用方即被丢弃，不持久化。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub links: Vec<ProductLink>,
    pub status: CrawlStatus,
}

impl CrawlResult {
    pub fn new(links: Vec<ProductLink>, status: CrawlStatus) -> Self {
        Self { links, status }
    }

    pub fn empty(status: CrawlStatus) -> Self {
        Self {
            links: Vec::new(),
            status,
        }
    }

    pub fn urls(&self) -> Vec<&str> {
        self.links.iter().map(ProductLink::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_is_not_retryable() {
        assert!(!CrawlStatus::Blocked.is_retryable());
        assert!(CrawlStatus::TimedOut.is_retryable());
        assert!(CrawlStatus::Empty.is_retryable());
    }
}
