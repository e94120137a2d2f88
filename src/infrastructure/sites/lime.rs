// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site_profile::{ScrollPolicy, SiteProfile};

/// lime 站点画像
///
/// 查询直接拼在搜索路径后；商品卡片的标记在不同版块间不一致，
/// 主选择器不命中时回退到旧版卡片选择器
pub fn profile() -> SiteProfile {
    SiteProfile {
        name: "lime".to_string(),
        origin: "https://lime-shop.com".to_string(),
        search_url_template: "https://lime-shop.com/ru_ru/search/{query}".to_string(),
        interaction_steps: vec![],
        link_selectors: vec![
            "div.product-card a[href*='/product/'], a[href*='/catalog/'], a.product-item"
                .to_string(),
            "a[href*='/item/'], a.product-link, div.product a".to_string(),
        ],
        allow_substrings: vec![
            "/product/".to_string(),
            "/catalog/".to_string(),
            "/item/".to_string(),
        ],
        exclude_substrings: vec![],
        exclude_suffixes: vec![],
        block_selectors: vec![],
        block_markers: vec![],
        content_selector: Some("div.catalog-item a".to_string()),
        ready_timeout_ms: 20_000,
        content_timeout_ms: 20_000,
        scroll: ScrollPolicy {
            max_iterations: 10,
            settle_ms: 3_000,
        },
    }
}
