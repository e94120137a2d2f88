// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 待确认支付
///
/// 每个用户最多一条，支付确认或取消后清除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayment {
    pub user_id: i64,
    /// 支付网关侧的支付标识
    pub payment_id: String,
}
