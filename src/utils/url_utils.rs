// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 规范化商品链接
///
/// 相对路径根据站点源解析为绝对路径，然后去掉查询串和片段，
/// 只保留 scheme + host + path。对已规范化的URL再次调用是幂等的。
pub fn normalize_url(base_url: &Url, raw: &str) -> Result<Url, ParseError> {
    let mut url = resolve_url(base_url, raw)?;
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        let path = "http://t.co/c";
        assert_eq!(
            resolve_url(&base, path).unwrap().as_str(),
            "http://t.co/c"
        );
    }

    #[test]
    fn test_resolve_protocol_relative_url() {
        let base = Url::parse("https://example.com/a/b").unwrap();
        let path = "//t.co/c";
        assert_eq!(
            resolve_url(&base, path).unwrap().as_str(),
            "https://t.co/c"
        );
    }

    #[test]
    fn test_resolve_root_relative_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        let path = "/c";
        assert_eq!(
            resolve_url(&base, path).unwrap().as_str(),
            "http://example.com/c"
        );
    }

    #[test]
    fn test_normalize_strips_query_and_fragment() {
        let base = Url::parse("https://shop.test/").unwrap();
        let url = normalize_url(&base, "https://shop.test/product/1?utm=x#gallery").unwrap();
        assert_eq!(url.as_str(), "https://shop.test/product/1");
    }

    #[test]
    fn test_normalize_resolves_relative_path() {
        let base = Url::parse("https://example.test/").unwrap();
        let url = normalize_url(&base, "/product/42").unwrap();
        assert_eq!(url.as_str(), "https://example.test/product/42");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let base = Url::parse("https://shop.test/").unwrap();
        let once = normalize_url(&base, "/product/9?page=2").unwrap();
        let twice = normalize_url(&base, once.as_str()).unwrap();
        assert_eq!(once, twice);
    }
}
