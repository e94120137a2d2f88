// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 用户风格问卷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub user_id: i64,
    pub name: Option<String>,
    pub age: Option<i32>,
    /// 偏好风格（自由文本）
    pub style: Option<String>,
    /// 偏好颜色（逗号分隔的自由文本）
    pub colors: Option<String>,
}

impl Questionnaire {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            name: None,
            age: None,
            style: None,
            colors: None,
        }
    }
}
