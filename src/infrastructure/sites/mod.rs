// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site_profile::SiteProfile;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// 站点目录模块
///
/// 每个内置站点一个模块，只包含该站点的常量配置表；
/// 注册表按名称解析画像，并支持从目录加载额外的YAML画像
pub mod befree;
pub mod lichi;
pub mod lime;
pub mod loverepublic;

#[derive(Error, Debug)]
pub enum SiteRegistryError {
    #[error("io error: {0}")]
    Io(String),
    #[error("profile parse error in {path}: {message}")]
    Parse { path: String, message: String },
}

/// 站点注册表
pub struct SiteRegistry {
    profiles: HashMap<String, SiteProfile>,
}

impl SiteRegistry {
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// 带全部内置站点画像的注册表
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        for profile in [
            befree::profile(),
            lichi::profile(),
            lime::profile(),
            loverepublic::profile(),
        ] {
            registry.insert(profile);
        }
        registry
    }

    /// 同名画像会覆盖已有条目，文件画像因此可以覆盖内置画像
    pub fn insert(&mut self, profile: SiteProfile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    pub fn get(&self, name: &str) -> Option<&SiteProfile> {
        self.profiles.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// 从目录加载所有 `.yaml`/`.yml` 画像文件
    ///
    /// # 返回值
    ///
    /// 成功加载的画像数量
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, SiteRegistryError> {
        let entries = std::fs::read_dir(dir).map_err(|e| SiteRegistryError::Io(e.to_string()))?;

        let mut loaded = 0;
        for entry in entries {
            let entry = entry.map_err(|e| SiteRegistryError::Io(e.to_string()))?;
            let path = entry.path();
            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if !is_yaml {
                continue;
            }

            let content = std::fs::read_to_string(&path)
                .map_err(|e| SiteRegistryError::Io(e.to_string()))?;
            let profile =
                SiteProfile::from_yaml(&content).map_err(|e| SiteRegistryError::Parse {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;

            info!(name = %profile.name, path = %path.display(), "site profile loaded");
            self.insert(profile);
            loaded += 1;
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_builtin_sites_are_registered() {
        let registry = SiteRegistry::with_builtin();
        assert_eq!(
            registry.names(),
            vec!["befree", "lichi", "lime", "loverepublic"]
        );
    }

    #[test]
    fn test_builtin_profiles_are_well_formed() {
        let registry = SiteRegistry::with_builtin();
        for name in registry.names() {
            let profile = registry.get(name).unwrap();

            profile.origin_url().expect("origin must parse");
            if profile.interaction_steps.is_empty() {
                assert!(
                    profile.search_url_template.contains("{query}"),
                    "{} template must carry the query placeholder",
                    name
                );
            }
            assert!(!profile.link_selectors.is_empty());
            assert!(!profile.allow_substrings.is_empty());
            assert!(profile.scroll.max_iterations > 0);
        }
    }

    #[test]
    fn test_builtin_selectors_parse_as_css() {
        let registry = SiteRegistry::with_builtin();
        for name in registry.names() {
            let profile = registry.get(name).unwrap();

            let mut selectors: Vec<&String> = Vec::new();
            selectors.extend(&profile.link_selectors);
            selectors.extend(&profile.block_selectors);
            selectors.extend(profile.content_selector.as_ref());
            for step in &profile.interaction_steps {
                selectors.extend(step.selectors());
            }

            for selector in selectors {
                assert!(
                    Selector::parse(selector).is_ok(),
                    "{}: invalid selector `{}`",
                    name,
                    selector
                );
            }
        }
    }

    #[test]
    fn test_load_dir_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("lime.yaml"),
            r#"
name: lime
origin: "https://lime-shop.com"
search_url_template: "https://lime-shop.com/tr_tr/search/{query}"
link_selectors: ["a[href*='/product/']"]
allow_substrings: ["/product/"]
scroll: { max_iterations: 4, settle_ms: 1000 }
"#,
        )
        .unwrap();

        let mut registry = SiteRegistry::with_builtin();
        let loaded = registry.load_dir(dir.path()).unwrap();

        assert_eq!(loaded, 1);
        let lime = registry.get("lime").unwrap();
        assert!(lime.search_url_template.contains("/tr_tr/"));
        assert_eq!(lime.scroll.max_iterations, 4);
    }
}
