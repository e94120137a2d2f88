// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl_result::{CrawlResult, CrawlStatus};
use crate::domain::models::product_link::ProductLink;
use crate::domain::models::site_profile::{InteractionStep, SiteProfile, QUERY_PLACEHOLDER};
use crate::domain::repositories::artifact_repository::ArtifactRepository;
use crate::engines::traits::{BrowserSession, SessionError, SessionFactory};
use crate::utils::url_utils;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn, Instrument};
use url::Url;
use uuid::Uuid;

const SCROLL_HEIGHT_JS: &str = "document.body.scrollHeight";
const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// 爬取错误类型
///
/// 只有会话获取失败和调用方输入错误会越过爬取边界；
/// 其余一切失败都在边界内映射为结果状态
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("invalid site profile: {0}")]
    InvalidProfile(String),
    #[error("browser session init failed: {0}")]
    DriverInit(String),
}

/// 商品链接爬取器
///
/// 由站点画像参数化的单一爬取器：驱动一个独占浏览器会话到达
/// 查询结果页，等待动态内容，滚动展开懒加载内容，按选择器链
/// 提取锚元素并按规范化URL去重。
///
/// 一次调用严格串行阻塞，调用之间不共享可变状态；
/// 宿主可以为不同站点或查询并行发起相互独立的调用。
pub struct ProductLinkCrawler {
    sessions: Arc<dyn SessionFactory>,
    artifacts: Option<Arc<dyn ArtifactRepository>>,
}

impl ProductLinkCrawler {
    pub fn new(
        sessions: Arc<dyn SessionFactory>,
        artifacts: Option<Arc<dyn ArtifactRepository>>,
    ) -> Self {
        Self { sessions, artifacts }
    }

    /// 对一个 (站点画像, 查询) 执行一次爬取
    ///
    /// # 参数
    ///
    /// * `profile` - 完整填充的站点画像
    /// * `query` - 非空查询词，不得预先URL编码
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlResult)` - 去重后的商品链接序列加结果状态
    /// * `Err(CrawlError)` - 会话获取失败或输入不合法
    pub async fn crawl(
        &self,
        profile: &SiteProfile,
        query: &str,
    ) -> Result<CrawlResult, CrawlError> {
        if query.trim().is_empty() {
            return Err(CrawlError::EmptyQuery);
        }
        let origin = profile
            .origin_url()
            .map_err(|e| CrawlError::InvalidProfile(format!("origin: {}", e)))?;
        if profile.interaction_steps.is_empty()
            && !profile.search_url_template.contains(QUERY_PLACEHOLDER)
        {
            return Err(CrawlError::InvalidProfile(format!(
                "search_url_template is missing the {} placeholder",
                QUERY_PLACEHOLDER
            )));
        }

        let crawl_id = Uuid::new_v4();
        let span = tracing::info_span!("crawl", site = %profile.name, %crawl_id);

        async move {
            let session = self
                .sessions
                .acquire(profile)
                .await
                .map_err(|e| CrawlError::DriverInit(e.to_string()))?;
            debug!("browser session acquired");

            let result = match self.run(session.as_ref(), profile, &origin, query).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, "crawl failed, returning empty result");
                    self.capture(session.as_ref(), profile, query, "error").await;
                    CrawlResult::empty(CrawlStatus::Error)
                }
            };

            // The session is released on every exit path
            if let Err(e) = session.close().await {
                warn!(error = %e, "session close failed");
            } else {
                debug!("browser session released");
            }

            info!(status = ?result.status, links = result.links.len(), "crawl finished");
            Ok(result)
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        session: &dyn BrowserSession,
        profile: &SiteProfile,
        origin: &Url,
        query: &str,
    ) -> Result<CrawlResult, SessionError> {
        // Reach the result page: direct query URL, or the site's search UI
        if profile.interaction_steps.is_empty() {
            let url = profile.search_url(query);
            info!(%url, "navigating to search url");
            session.navigate(&url).await?;
        } else {
            info!(url = %profile.search_url_template, "navigating to start page");
            session.navigate(&profile.search_url_template).await?;
            self.perform_steps(session, profile, query).await?;
        }

        // Page readiness degrades to best-effort extraction on timeout
        let mut timed_out = false;
        match session.wait_until_ready(profile.ready_timeout()).await {
            Ok(()) => {}
            Err(SessionError::Timeout) => {
                warn!("page readiness wait timed out, extracting best effort");
                timed_out = true;
                self.capture(session, profile, query, "timeout").await;
            }
            Err(e) => return Err(e),
        }

        // Block detection precedes any extraction attempt
        if self.detect_block(session, profile).await? {
            warn!("block indicator detected");
            self.capture(session, profile, query, "block").await;
            return Ok(CrawlResult::empty(CrawlStatus::Blocked));
        }

        // Best-effort wait for the product grid before revealing more
        if let Some(selector) = &profile.content_selector {
            if session
                .wait_for(selector, profile.content_timeout())
                .await
                .is_err()
            {
                warn!(selector = %selector, "product grid did not appear in time");
            }
        }

        self.reveal_lazy_content(session, profile).await?;

        let links = self.extract_links(session, profile, origin).await?;

        if links.is_empty() && !timed_out {
            warn!("no product links extracted");
            self.capture(session, profile, query, "no_results").await;
        }

        let status = if timed_out {
            CrawlStatus::TimedOut
        } else if links.is_empty() {
            CrawlStatus::Empty
        } else {
            CrawlStatus::Success
        };

        Ok(CrawlResult::new(links, status))
    }

    /// 依次执行搜索交互步骤，每步在其候选选择器链上等待第一个出现的目标
    async fn perform_steps(
        &self,
        session: &dyn BrowserSession,
        profile: &SiteProfile,
        query: &str,
    ) -> Result<(), SessionError> {
        for step in &profile.interaction_steps {
            let selector = self.await_step_target(session, step).await?;
            match step {
                InteractionStep::Click { .. } => session.click(&selector).await?,
                // The raw query is typed as-is, encoding only applies to URLs
                InteractionStep::TypeQuery { .. } => session.type_text(&selector, query).await?,
                InteractionStep::Submit { .. } => session.press_enter(&selector).await?,
            }
            debug!(selector = %selector, "interaction step done");
        }
        Ok(())
    }

    async fn await_step_target(
        &self,
        session: &dyn BrowserSession,
        step: &InteractionStep,
    ) -> Result<String, SessionError> {
        for selector in step.selectors() {
            match session.wait_for(selector, step.timeout()).await {
                Ok(()) => return Ok(selector.clone()),
                Err(SessionError::Timeout) => {
                    debug!(selector = %selector, "step target not found, trying next candidate");
                }
                Err(e) => return Err(e),
            }
        }
        Err(SessionError::Interaction {
            selector: step.selectors().join(", "),
        })
    }

    async fn detect_block(
        &self,
        session: &dyn BrowserSession,
        profile: &SiteProfile,
    ) -> Result<bool, SessionError> {
        for selector in &profile.block_selectors {
            if session.count(selector).await? > 0 {
                debug!(selector = %selector, "block selector matched");
                return Ok(true);
            }
        }

        if !profile.block_markers.is_empty() {
            let markup = session.content().await?;
            for marker in &profile.block_markers {
                if markup.contains(marker.as_str()) {
                    debug!(marker = %marker, "block marker found in markup");
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// 反复滚动到底并比较前后文档高度，高度不再变化或达到
    /// 最大滚动次数时停止
    async fn reveal_lazy_content(
        &self,
        session: &dyn BrowserSession,
        profile: &SiteProfile,
    ) -> Result<(), SessionError> {
        let mut last_height = self.document_height(session).await?;

        for iteration in 1..=profile.scroll.max_iterations {
            session.evaluate(SCROLL_TO_BOTTOM_JS).await?;
            tokio::time::sleep(profile.scroll.settle()).await;

            let height = self.document_height(session).await?;
            if height == last_height {
                break;
            }
            debug!(
                iteration,
                max = profile.scroll.max_iterations,
                height,
                "scrolled"
            );
            last_height = height;
        }

        Ok(())
    }

    async fn document_height(&self, session: &dyn BrowserSession) -> Result<i64, SessionError> {
        Ok(session
            .evaluate(SCROLL_HEIGHT_JS)
            .await?
            .as_i64()
            .unwrap_or(0))
    }

    /// 候选选择器按顺序尝试，取第一个至少命中一个元素的（回退链，非并集）；
    /// 对命中元素读取 href，解析过滤后按规范化URL去重，保留首次出现顺序
    async fn extract_links(
        &self,
        session: &dyn BrowserSession,
        profile: &SiteProfile,
        origin: &Url,
    ) -> Result<Vec<ProductLink>, SessionError> {
        let mut hrefs = Vec::new();
        for selector in &profile.link_selectors {
            let values = session.attribute_values(selector, "href").await?;
            if !values.is_empty() {
                debug!(selector = %selector, matches = values.len(), "link selector matched");
                hrefs = values;
                break;
            }
        }

        let mut seen = HashSet::new();
        let mut links = Vec::new();
        for href in hrefs.into_iter().flatten() {
            if href.is_empty() {
                continue;
            }
            let resolved = match url_utils::resolve_url(origin, &href) {
                Ok(url) => url,
                Err(e) => {
                    debug!(href = %href, error = %e, "unparsable href skipped");
                    continue;
                }
            };
            // Path filters run on the resolved URL before query stripping,
            // so pagination parameters are still visible to them
            if !self.accepts(profile, resolved.as_str()) {
                continue;
            }
            let link = match ProductLink::parse(origin, resolved.as_str()) {
                Ok(link) => link,
                Err(e) => {
                    debug!(href = %href, error = %e, "normalization failed");
                    continue;
                }
            };
            if seen.insert(link.clone()) {
                links.push(link);
            }
        }

        debug!(unique = links.len(), "links extracted");
        Ok(links)
    }

    fn accepts(&self, profile: &SiteProfile, url: &str) -> bool {
        if !profile
            .allow_substrings
            .iter()
            .any(|s| url.contains(s.as_str()))
        {
            return false;
        }
        if profile
            .exclude_substrings
            .iter()
            .any(|s| url.contains(s.as_str()))
        {
            return false;
        }
        if profile
            .exclude_suffixes
            .iter()
            .any(|s| url.ends_with(s.as_str()))
        {
            return false;
        }
        true
    }

    /// 捕获调试存档；接收器的任何失败只记录日志
    async fn capture(
        &self,
        session: &dyn BrowserSession,
        profile: &SiteProfile,
        query: &str,
        reason: &str,
    ) {
        let Some(sink) = &self.artifacts else {
            return;
        };

        let label = format!("{}_{}_{}", profile.name, reason, query);
        let screenshot = match session.screenshot().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "screenshot capture failed");
                Vec::new()
            }
        };
        let markup = match session.content().await {
            Ok(markup) => markup,
            Err(e) => {
                warn!(error = %e, "markup capture failed");
                String::new()
            }
        };

        if let Err(e) = sink.persist(&label, &screenshot, &markup).await {
            warn!(error = %e, label = %label, "debug artifact persist failed");
        }
    }
}
