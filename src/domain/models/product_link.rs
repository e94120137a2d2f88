// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::url_utils;
use serde::{Deserialize, Serialize};
use url::{ParseError, Url};

/// 商品链接值对象
///
/// 包装一个规范化后的绝对URL，相等性按规范化URL判断。
/// 只由爬取器产生，产生后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductLink {
    url: String,
}

impl ProductLink {
    /// Resolve and normalize a raw href against the site origin.
    pub fn parse(origin: &Url, raw: &str) -> Result<Self, ParseError> {
        let url = url_utils::normalize_url(origin, raw)?;
        Ok(Self {
            url: url.into(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for ProductLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_normalized_url() {
        let origin = Url::parse("https://shop.test").unwrap();
        let a = ProductLink::parse(&origin, "/product/1?ref=grid").unwrap();
        let b = ProductLink::parse(&origin, "https://shop.test/product/1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_relative_href_resolves_against_origin() {
        let origin = Url::parse("https://example.test").unwrap();
        let link = ProductLink::parse(&origin, "/product/42").unwrap();
        assert_eq!(link.as_str(), "https://example.test/product/42");
    }
}
