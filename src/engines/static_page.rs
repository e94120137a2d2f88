// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site_profile::SiteProfile;
use crate::engines::traits::{BrowserSession, SessionError, SessionFactory};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// PNG签名，作为离线会话的截图占位字节
const PNG_STUB: &[u8] = b"\x89PNG\r\n\x1a\n";

struct State {
    html: String,
    /// 提交后换入的结果页标记
    results_html: Option<String>,
    /// 依次返回的文档高度，最后一个值重复返回
    heights: VecDeque<i64>,
    ready_times_out: bool,
    last_url: Option<String>,
    typed: Vec<(String, String)>,
    closed: bool,
}

/// 静态页面会话
///
/// 在一份固定HTML文档上实现浏览器会话能力，选择器查询由
/// scraper 完成。用于离线夹具和爬取流程的单元测试：可脚本化
/// 提交后的结果页、滚动高度序列和就绪超时。
#[derive(Clone)]
pub struct StaticPageSession {
    state: Arc<Mutex<State>>,
}

impl StaticPageSession {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                html: html.into(),
                results_html: None,
                heights: VecDeque::new(),
                ready_times_out: false,
                last_url: None,
                typed: Vec::new(),
                closed: false,
            })),
        }
    }

    /// 回车提交后换入的结果页
    pub fn with_results_page(self, html: impl Into<String>) -> Self {
        self.state.lock().unwrap().results_html = Some(html.into());
        self
    }

    /// 脚本化的文档高度序列
    pub fn with_heights(self, heights: Vec<i64>) -> Self {
        self.state.lock().unwrap().heights = heights.into();
        self
    }

    /// 强制就绪等待超时
    pub fn with_ready_timeout(self) -> Self {
        self.state.lock().unwrap().ready_times_out = true;
        self
    }

    pub fn last_url(&self) -> Option<String> {
        self.state.lock().unwrap().last_url.clone()
    }

    pub fn typed_text(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().typed.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }

    fn html(&self) -> String {
        self.state.lock().unwrap().html.clone()
    }

    fn select_count(html: &str, selector: &str) -> Result<usize, SessionError> {
        let selector =
            Selector::parse(selector).map_err(|e| SessionError::Selector(e.to_string()))?;
        Ok(Html::parse_document(html).select(&selector).count())
    }
}

#[async_trait]
impl BrowserSession for StaticPageSession {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.state.lock().unwrap().last_url = Some(url.to_string());
        Ok(())
    }

    async fn wait_until_ready(&self, _timeout: Duration) -> Result<(), SessionError> {
        if self.state.lock().unwrap().ready_times_out {
            return Err(SessionError::Timeout);
        }
        Ok(())
    }

    async fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<(), SessionError> {
        if Self::select_count(&self.html(), selector)? > 0 {
            Ok(())
        } else {
            Err(SessionError::Timeout)
        }
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, SessionError> {
        // The scroll command also mentions scrollHeight, match it first
        if script.contains("scrollTo") {
            return Ok(serde_json::Value::Null);
        }
        if script.contains("scrollHeight") {
            let mut state = self.state.lock().unwrap();
            let height = match state.heights.len() {
                0 => 0,
                1 => state.heights[0],
                _ => state.heights.pop_front().unwrap_or(0),
            };
            return Ok(serde_json::json!(height));
        }
        if script.contains("readyState") {
            return Ok(serde_json::json!("complete"));
        }
        Ok(serde_json::Value::Null)
    }

    async fn click(&self, selector: &str) -> Result<(), SessionError> {
        if Self::select_count(&self.html(), selector)? == 0 {
            return Err(SessionError::Interaction {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        if Self::select_count(&self.html(), selector)? == 0 {
            return Err(SessionError::Interaction {
                selector: selector.to_string(),
            });
        }
        self.state
            .lock()
            .unwrap()
            .typed
            .push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn press_enter(&self, selector: &str) -> Result<(), SessionError> {
        if Self::select_count(&self.html(), selector)? == 0 {
            return Err(SessionError::Interaction {
                selector: selector.to_string(),
            });
        }
        let mut state = self.state.lock().unwrap();
        if let Some(results) = state.results_html.take() {
            state.html = results;
        }
        Ok(())
    }

    async fn count(&self, selector: &str) -> Result<usize, SessionError> {
        Self::select_count(&self.html(), selector)
    }

    async fn attribute_values(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Vec<Option<String>>, SessionError> {
        let selector =
            Selector::parse(selector).map_err(|e| SessionError::Selector(e.to_string()))?;
        let html = self.html();
        let document = Html::parse_document(&html);
        Ok(document
            .select(&selector)
            .map(|element| element.value().attr(attr).map(str::to_owned))
            .collect())
    }

    async fn content(&self) -> Result<String, SessionError> {
        Ok(self.html())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, SessionError> {
        Ok(PNG_STUB.to_vec())
    }

    async fn close(&self) -> Result<(), SessionError> {
        self.state.lock().unwrap().closed = true;
        Ok(())
    }
}

/// 静态会话工厂
///
/// 按入队顺序交出预先准备好的会话；队列耗尽时获取失败
#[derive(Default)]
pub struct StaticSessionFactory {
    sessions: Mutex<VecDeque<StaticPageSession>>,
}

impl StaticSessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(session: StaticPageSession) -> Self {
        let factory = Self::new();
        factory.push(session);
        factory
    }

    pub fn push(&self, session: StaticPageSession) {
        self.sessions.lock().unwrap().push_back(session);
    }
}

#[async_trait]
impl SessionFactory for StaticSessionFactory {
    async fn acquire(&self, _profile: &SiteProfile) -> Result<Box<dyn BrowserSession>, SessionError> {
        self.sessions
            .lock()
            .unwrap()
            .pop_front()
            .map(|session| Box::new(session) as Box<dyn BrowserSession>)
            .ok_or_else(|| SessionError::DriverInit("no static page queued".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_and_attributes() {
        let session = StaticPageSession::new(
            r#"<html><body>
                <a class="card" href="/product/1">one</a>
                <a class="card" href="/product/2">two</a>
                <a class="other">no href</a>
            </body></html>"#,
        );

        assert_eq!(session.count("a.card").await.unwrap(), 2);
        assert_eq!(session.count("div.missing").await.unwrap(), 0);

        let hrefs = session.attribute_values("a", "href").await.unwrap();
        assert_eq!(
            hrefs,
            vec![
                Some("/product/1".to_string()),
                Some("/product/2".to_string()),
                None
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_selector_is_reported() {
        let session = StaticPageSession::new("<html></html>");
        assert!(matches!(
            session.count("a[href=").await,
            Err(SessionError::Selector(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_swaps_in_results_page() {
        let session = StaticPageSession::new(r#"<input class="search">"#)
            .with_results_page(r#"<a href="/product/1">x</a>"#);

        session.type_text("input.search", "dress").await.unwrap();
        session.press_enter("input.search").await.unwrap();

        assert_eq!(session.count("a").await.unwrap(), 1);
        assert_eq!(
            session.typed_text(),
            vec![("input.search".to_string(), "dress".to_string())]
        );
    }

    #[tokio::test]
    async fn test_factory_drains_queue() {
        let factory = StaticSessionFactory::single(StaticPageSession::new("<html></html>"));
        let profile_yaml = r#"
name: shop
origin: "https://shop.test"
search_url_template: "https://shop.test/search?q={query}"
link_selectors: ["a"]
allow_substrings: ["/product/"]
scroll: { max_iterations: 1, settle_ms: 0 }
"#;
        let profile = crate::domain::models::site_profile::SiteProfile::from_yaml(profile_yaml).unwrap();

        assert!(factory.acquire(&profile).await.is_ok());
        assert!(matches!(
            factory.acquire(&profile).await,
            Err(SessionError::DriverInit(_))
        ));
    }
}
