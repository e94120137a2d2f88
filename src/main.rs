// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{bail, Context};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use stylescout::config::settings::Settings;
use stylescout::domain::models::subscription::QuotaKind;
use stylescout::domain::repositories::artifact_repository::ArtifactRepository;
use stylescout::domain::repositories::subscription_repository::{
    SubscriptionRepository, SubscriptionRepositoryError,
};
use stylescout::domain::services::crawl_service::ProductLinkCrawler;
use stylescout::engines::chromium::ChromiumSessionFactory;
use stylescout::infrastructure::artifacts::LocalArtifactStore;
use stylescout::infrastructure::database::connection;
use stylescout::infrastructure::repositories::subscription_repo_impl::SubscriptionRepositoryImpl;
use stylescout::infrastructure::sites::SiteRegistry;
use stylescout::utils::telemetry;
use tracing::info;

/// 主函数
///
/// `stylescout <site> <query> [user-id]`：按站点画像执行一次商品搜索
/// 爬取并打印找到的链接。给出 user-id 时先通过订阅闸门扣减搜索配额。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();

    let settings = Arc::new(Settings::new()?);

    let mut args = std::env::args().skip(1);
    let (site, query) = match (args.next(), args.next()) {
        (Some(site), Some(query)) => (site, query),
        _ => bail!("usage: stylescout <site> <query> [user-id]"),
    };
    let user_id: Option<i64> = match args.next() {
        Some(raw) => Some(raw.parse().context("user-id must be an integer")?),
        None => None,
    };

    let mut registry = SiteRegistry::with_builtin();
    if let Some(dir) = &settings.sites.profile_dir {
        let loaded = registry.load_dir(std::path::Path::new(dir))?;
        info!(loaded, dir = %dir, "extra site profiles loaded");
    }
    let profile = registry
        .get(&site)
        .with_context(|| {
            format!(
                "unknown site '{}', available: {}",
                site,
                registry.names().join(", ")
            )
        })?
        .clone();

    if let Some(user_id) = user_id {
        gate_on_subscription(&settings, user_id).await?;
    }

    let sessions = Arc::new(ChromiumSessionFactory::new(settings.browser.clone()));
    let artifacts = settings.artifacts.enabled.then(|| {
        Arc::new(LocalArtifactStore::new(settings.artifacts.dir.clone()))
            as Arc<dyn ArtifactRepository>
    });

    let crawler = ProductLinkCrawler::new(sessions, artifacts);
    let result = crawler.crawl(&profile, &query).await?;

    info!(status = ?result.status, links = result.links.len(), "crawl finished");
    for link in &result.links {
        println!("{}", link);
    }

    Ok(())
}

/// 订阅闸门：确保订阅处于有效期内并扣减一次搜索配额
async fn gate_on_subscription(settings: &Settings, user_id: i64) -> anyhow::Result<()> {
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    Migrator::up(db.as_ref(), None).await?;

    let subscriptions = SubscriptionRepositoryImpl::new(db);
    let subscription = subscriptions.ensure(user_id).await?;

    if !subscription.active {
        bail!("subscription for user {} is not active", user_id);
    }
    if subscription.is_expired(chrono::Utc::now()) {
        bail!(
            "subscription for user {} expired at {}",
            user_id,
            subscription.expires_at()
        );
    }

    match subscriptions
        .consume(user_id, QuotaKind::SearchRequests)
        .await
    {
        Ok(remaining) => {
            info!(user_id, remaining, "search request consumed");
            Ok(())
        }
        Err(SubscriptionRepositoryError::QuotaExhausted { .. }) => {
            bail!("user {} has no search requests left", user_id)
        }
        Err(e) => Err(e.into()),
    }
}
