// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site_profile::{ScrollPolicy, SiteProfile};

/// befree 站点画像
///
/// 搜索页由 Digi 组件渲染，商品栅格出现前有较长的脚本执行期，
/// 偶发的 PerimeterX 挑战和 502 错误页需要识别为封锁
pub fn profile() -> SiteProfile {
    SiteProfile {
        name: "befree".to_string(),
        origin: "https://befree.ru".to_string(),
        search_url_template: "https://befree.ru/search?query={query}".to_string(),
        interaction_steps: vec![],
        link_selectors: vec![
            "a[href*='/platia/'], a[href*='/product/'], a.digi-product__link".to_string(),
            "a.digi-product__link".to_string(),
            "div.digi-product a".to_string(),
            "a.product-link".to_string(),
        ],
        allow_substrings: vec!["/platia/".to_string(), "/product/".to_string()],
        exclude_substrings: vec![],
        exclude_suffixes: vec![],
        block_selectors: vec![
            "iframe[src*='captcha'], div[id*='captcha'], div[class*='captcha']".to_string(),
            "script[src*='perimeterx'], div[class*='px-captcha'], div[id*='px-captcha']"
                .to_string(),
        ],
        block_markers: vec!["502 Bad Gateway".to_string()],
        content_selector: Some(
            "div.digi-products-grid, div.digi-product, a.digi-product__link".to_string(),
        ),
        ready_timeout_ms: 30_000,
        content_timeout_ms: 60_000,
        scroll: ScrollPolicy {
            max_iterations: 15,
            settle_ms: 3_000,
        },
    }
}
