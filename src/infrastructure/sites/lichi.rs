// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site_profile::{InteractionStep, ScrollPolicy, SiteProfile};

/// lichi 站点画像
///
/// 没有直接的查询URL：从首页点击搜索图标、输入查询并回车。
/// 输入框有两代标记，选择器链依次回退
pub fn profile() -> SiteProfile {
    let input_selectors = vec![
        "input.ui-form-search_ui_search_box__input__mWuk3".to_string(),
        "#sidebar_search_input".to_string(),
    ];

    SiteProfile {
        name: "lichi".to_string(),
        origin: "https://lichi.com".to_string(),
        search_url_template: "https://lichi.com/ru/ru".to_string(),
        interaction_steps: vec![
            InteractionStep::Click {
                selectors: vec![
                    "i.header-base_page_item__icon__NxNyw.header-base_search__fPIKL".to_string(),
                ],
                timeout_ms: 10_000,
            },
            InteractionStep::TypeQuery {
                selectors: input_selectors.clone(),
                timeout_ms: 10_000,
            },
            InteractionStep::Submit {
                selectors: input_selectors,
                timeout_ms: 10_000,
            },
        ],
        link_selectors: vec!["a[href*='/product/']".to_string()],
        allow_substrings: vec!["/product/".to_string()],
        exclude_substrings: vec![],
        exclude_suffixes: vec![],
        block_selectors: vec![],
        block_markers: vec![],
        content_selector: None,
        ready_timeout_ms: 20_000,
        content_timeout_ms: 20_000,
        scroll: ScrollPolicy {
            max_iterations: 10,
            settle_ms: 2_000,
        },
    }
}
