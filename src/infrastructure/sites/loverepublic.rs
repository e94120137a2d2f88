// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site_profile::{ScrollPolicy, SiteProfile};

/// loverepublic 站点画像
///
/// 商品和版块链接共用 /catalog/odezhda/ 前缀，
/// 版块页自身和分页链接要按后缀和参数剔除
pub fn profile() -> SiteProfile {
    SiteProfile {
        name: "loverepublic".to_string(),
        origin: "https://loverepublic.ru".to_string(),
        search_url_template: "https://loverepublic.ru/catalog/search/{query}".to_string(),
        interaction_steps: vec![],
        link_selectors: vec![
            "div.product-card a[href*='/catalog/odezhda/']".to_string(),
            "a[href*='/catalog/odezhda/']".to_string(),
        ],
        allow_substrings: vec!["/catalog/odezhda/".to_string()],
        exclude_substrings: vec!["page=".to_string()],
        exclude_suffixes: vec![
            "/catalog/".to_string(),
            "/catalog/odezhda/".to_string(),
            "/new/".to_string(),
            "/sale/".to_string(),
        ],
        block_selectors: vec![],
        block_markers: vec![],
        content_selector: None,
        ready_timeout_ms: 20_000,
        content_timeout_ms: 20_000,
        scroll: ScrollPolicy {
            max_iterations: 10,
            settle_ms: 3_000,
        },
    }
}
