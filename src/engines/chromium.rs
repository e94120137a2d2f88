// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::domain::models::site_profile::SiteProfile;
use crate::engines::traits::{BrowserSession, SessionError, SessionFactory};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::Instant;

/// 元素出现/就绪轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chromium 会话工厂
///
/// 浏览器实例在首次获取会话时惰性启动并复用，避免每次请求
/// 重新拉起 Chrome；每次爬取独占其中一个页面。
pub struct ChromiumSessionFactory {
    settings: BrowserSettings,
    browser: OnceCell<Browser>,
}

impl ChromiumSessionFactory {
    pub fn new(settings: BrowserSettings) -> Self {
        Self {
            settings,
            browser: OnceCell::new(),
        }
    }

    async fn browser(&self) -> Result<&Browser, SessionError> {
        self.browser
            .get_or_try_init(|| async {
                let mut builder = BrowserConfig::builder()
                    .no_sandbox()
                    .window_size(self.settings.window_width, self.settings.window_height)
                    .request_timeout(Duration::from_secs(self.settings.request_timeout));

                if !self.settings.headless {
                    builder = builder.with_head();
                }

                if let Some(path) = &self.settings.chrome_binary {
                    builder = builder.chrome_executable(path);
                }

                builder = builder
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage")
                    .arg("--ignore-certificate-errors");

                if let Some(proxy) = &self.settings.proxy {
                    builder = builder.arg(format!("--proxy-server={}", proxy));
                }

                let config = builder.build().map_err(SessionError::DriverInit)?;

                let (browser, mut handler) = Browser::launch(config)
                    .await
                    .map_err(|e| SessionError::DriverInit(e.to_string()))?;

                // Drain browser events for the lifetime of the instance
                tokio::spawn(async move {
                    while let Some(event) = handler.next().await {
                        if event.is_err() {
                            break;
                        }
                    }
                });

                tracing::info!("chromium browser launched");
                Ok(browser)
            })
            .await
    }
}

#[async_trait]
impl SessionFactory for ChromiumSessionFactory {
    async fn acquire(&self, _profile: &SiteProfile) -> Result<Box<dyn BrowserSession>, SessionError> {
        let browser = self.browser().await?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SessionError::DriverInit(e.to_string()))?;

        page.set_user_agent(self.settings.user_agent.as_str())
            .await
            .map_err(|e| SessionError::DriverInit(e.to_string()))?;

        Ok(Box::new(ChromiumSession { page }))
    }
}

/// 一个页面即一个会话
pub struct ChromiumSession {
    page: Page,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| SessionError::Navigation(e.to_string()))?;
        Ok(())
    }

    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), SessionError> {
        let deadline = Instant::now() + timeout;
        loop {
            let state = self
                .evaluate("document.readyState")
                .await
                .ok()
                .and_then(|v| v.as_str().map(str::to_owned));

            if state.as_deref() == Some("complete") {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SessionError::Timeout);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), SessionError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.count(selector).await? > 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SessionError::Timeout);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, SessionError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| SessionError::Script(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn click(&self, selector: &str) -> Result<(), SessionError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| SessionError::Interaction {
                selector: selector.to_string(),
            })?;
        element
            .click()
            .await
            .map_err(|e| SessionError::Other(e.to_string()))?;
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| SessionError::Interaction {
                selector: selector.to_string(),
            })?;
        element
            .click()
            .await
            .map_err(|e| SessionError::Other(e.to_string()))?;
        element
            .type_str(text)
            .await
            .map_err(|e| SessionError::Other(e.to_string()))?;
        Ok(())
    }

    async fn press_enter(&self, selector: &str) -> Result<(), SessionError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| SessionError::Interaction {
                selector: selector.to_string(),
            })?;
        element
            .press_key("Enter")
            .await
            .map_err(|e| SessionError::Other(e.to_string()))?;
        Ok(())
    }

    async fn count(&self, selector: &str) -> Result<usize, SessionError> {
        // A selector with no matches is an empty result, not an error
        match self.page.find_elements(selector).await {
            Ok(elements) => Ok(elements.len()),
            Err(_) => Ok(0),
        }
    }

    async fn attribute_values(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Vec<Option<String>>, SessionError> {
        let elements = match self.page.find_elements(selector).await {
            Ok(elements) => elements,
            Err(_) => return Ok(Vec::new()),
        };

        let mut values = Vec::with_capacity(elements.len());
        for element in &elements {
            match element.attribute(attr).await {
                Ok(value) => values.push(value),
                Err(e) => {
                    tracing::debug!(selector, attr, error = %e, "attribute read failed");
                    values.push(None);
                }
            }
        }
        Ok(values)
    }

    async fn content(&self) -> Result<String, SessionError> {
        self.page
            .content()
            .await
            .map_err(|e| SessionError::Other(e.to_string()))
    }

    async fn screenshot(&self) -> Result<Vec<u8>, SessionError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        self.page
            .screenshot(params)
            .await
            .map_err(|e| SessionError::Other(e.to_string()))
    }

    async fn close(&self) -> Result<(), SessionError> {
        self.page
            .clone()
            .close()
            .await
            .map_err(|e| SessionError::Other(e.to_string()))
    }
}
