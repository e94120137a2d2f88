// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 默认资费
pub const DEFAULT_TARIFF: &str = "month";
/// 默认订阅时长（天）
pub const DEFAULT_DURATION_DAYS: i32 = 30;
/// 各配额的默认额度
pub const DEFAULT_SEARCH_REQUESTS: i32 = 5;
pub const DEFAULT_OUTFIT_ANALYSIS: i32 = 3;
pub const DEFAULT_ADVICE_MESSAGES: i32 = 7;

/// 订阅配额种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaKind {
    /// 商品搜索请求
    SearchRequests,
    /// 穿搭分析
    OutfitAnalysis,
    /// 建议消息
    AdviceMessages,
}

impl QuotaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SearchRequests => "search_requests",
            Self::OutfitAnalysis => "outfit_analysis",
            Self::AdviceMessages => "advice_messages",
        }
    }
}

impl std::fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 用户订阅记录
///
/// 按用户维护的配额计数和到期时间，由账务/配额服务修改，
/// 爬取器从不写入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: i64,
    pub active: bool,
    pub tariff: String,
    pub search_requests_left: i32,
    pub outfit_analysis_left: i32,
    pub advice_messages_left: i32,
    pub started_at: DateTime<Utc>,
    pub duration_days: i32,
}

impl Subscription {
    /// 按默认额度创建一条未激活的订阅
    pub fn with_defaults(user_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            active: false,
            tariff: DEFAULT_TARIFF.to_string(),
            search_requests_left: DEFAULT_SEARCH_REQUESTS,
            outfit_analysis_left: DEFAULT_OUTFIT_ANALYSIS,
            advice_messages_left: DEFAULT_ADVICE_MESSAGES,
            started_at: now,
            duration_days: DEFAULT_DURATION_DAYS,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.started_at + Duration::days(self.duration_days as i64)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn remaining(&self, kind: QuotaKind) -> i32 {
        match kind {
            QuotaKind::SearchRequests => self.search_requests_left,
            QuotaKind::OutfitAnalysis => self.outfit_analysis_left,
            QuotaKind::AdviceMessages => self.advice_messages_left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        let sub = Subscription::with_defaults(1, now);
        assert!(!sub.is_expired(now));
        assert!(sub.is_expired(now + Duration::days(30)));
    }

    #[test]
    fn test_default_quotas() {
        let sub = Subscription::with_defaults(1, Utc::now());
        assert_eq!(sub.remaining(QuotaKind::SearchRequests), 5);
        assert_eq!(sub.remaining(QuotaKind::OutfitAnalysis), 3);
        assert_eq!(sub.remaining(QuotaKind::AdviceMessages), 7);
        assert!(!sub.active);
    }
}
