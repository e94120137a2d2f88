// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

use crate::domain::{
    models::subscription::{QuotaKind, Subscription},
    repositories::subscription_repository::{SubscriptionRepository, SubscriptionRepositoryError},
};

use crate::infrastructure::database::entities::subscription;

pub struct SubscriptionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SubscriptionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find(
        &self,
        user_id: i64,
    ) -> Result<Option<subscription::Model>, SubscriptionRepositoryError> {
        subscription::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| SubscriptionRepositoryError::DatabaseError(e.to_string()))
    }
}

fn to_domain(model: subscription::Model) -> Subscription {
    Subscription {
        user_id: model.user_id,
        active: model.subscription_active,
        tariff: model.tariff,
        search_requests_left: model.search_requests_left,
        outfit_analysis_left: model.outfit_analysis_left,
        advice_messages_left: model.advice_messages_left,
        started_at: model.subscription_start.into(),
        duration_days: model.duration_days,
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionRepositoryImpl {
    async fn get(
        &self,
        user_id: i64,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        Ok(self.find(user_id).await?.map(to_domain))
    }

    async fn ensure(&self, user_id: i64) -> Result<Subscription, SubscriptionRepositoryError> {
        if let Some(model) = self.find(user_id).await? {
            return Ok(to_domain(model));
        }

        // Create an inactive record with default quotas if not exists
        let defaults = Subscription::with_defaults(user_id, Utc::now());
        let active = subscription::ActiveModel {
            user_id: Set(defaults.user_id),
            subscription_active: Set(defaults.active),
            tariff: Set(defaults.tariff.clone()),
            search_requests_left: Set(defaults.search_requests_left),
            outfit_analysis_left: Set(defaults.outfit_analysis_left),
            advice_messages_left: Set(defaults.advice_messages_left),
            subscription_start: Set(defaults.started_at.fixed_offset()),
            duration_days: Set(defaults.duration_days),
        };
        active
            .insert(self.db.as_ref())
            .await
            .map_err(|e| SubscriptionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(defaults)
    }

    async fn activate(
        &self,
        user_id: i64,
        tariff: &str,
        duration_days: i32,
    ) -> Result<Subscription, SubscriptionRepositoryError> {
        self.ensure(user_id).await?;

        let model = self
            .find(user_id)
            .await?
            .ok_or(SubscriptionRepositoryError::NotFound(user_id))?;

        let defaults = Subscription::with_defaults(user_id, Utc::now());
        let mut active: subscription::ActiveModel = model.into();
        active.subscription_active = Set(true);
        active.tariff = Set(tariff.to_string());
        active.duration_days = Set(duration_days);
        active.search_requests_left = Set(defaults.search_requests_left);
        active.outfit_analysis_left = Set(defaults.outfit_analysis_left);
        active.advice_messages_left = Set(defaults.advice_messages_left);
        active.subscription_start = Set(Utc::now().fixed_offset());

        let updated = active
            .update(self.db.as_ref())
            .await
            .map_err(|e| SubscriptionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(to_domain(updated))
    }

    async fn deactivate(&self, user_id: i64) -> Result<(), SubscriptionRepositoryError> {
        let model = self
            .find(user_id)
            .await?
            .ok_or(SubscriptionRepositoryError::NotFound(user_id))?;

        let mut active: subscription::ActiveModel = model.into();
        active.subscription_active = Set(false);
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| SubscriptionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn consume(
        &self,
        user_id: i64,
        kind: QuotaKind,
    ) -> Result<i32, SubscriptionRepositoryError> {
        let model = self
            .find(user_id)
            .await?
            .ok_or(SubscriptionRepositoryError::NotFound(user_id))?;

        let current = match kind {
            QuotaKind::SearchRequests => model.search_requests_left,
            QuotaKind::OutfitAnalysis => model.outfit_analysis_left,
            QuotaKind::AdviceMessages => model.advice_messages_left,
        };

        if current <= 0 {
            return Err(SubscriptionRepositoryError::QuotaExhausted { kind });
        }

        let remaining = current - 1;
        let mut active: subscription::ActiveModel = model.into();
        match kind {
            QuotaKind::SearchRequests => active.search_requests_left = Set(remaining),
            QuotaKind::OutfitAnalysis => active.outfit_analysis_left = Set(remaining),
            QuotaKind::AdviceMessages => active.advice_messages_left = Set(remaining),
        }
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| SubscriptionRepositoryError::DatabaseError(e.to_string()))?;

        Ok(remaining)
    }
}
