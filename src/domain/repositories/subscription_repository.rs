// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::subscription::{QuotaKind, Subscription};

#[derive(Error, Debug)]
pub enum SubscriptionRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Subscription not found for user: {0}")]
    NotFound(i64),
    #[error("Quota exhausted: {kind}")]
    QuotaExhausted { kind: QuotaKind },
}

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Get a user's subscription
    async fn get(&self, user_id: i64) -> Result<Option<Subscription>, SubscriptionRepositoryError>;

    /// Get a user's subscription, creating an inactive one with default
    /// quotas if none exists
    async fn ensure(&self, user_id: i64) -> Result<Subscription, SubscriptionRepositoryError>;

    /// Activate a subscription: set the tariff and duration, reset the
    /// quota counters and the start date
    async fn activate(
        &self,
        user_id: i64,
        tariff: &str,
        duration_days: i32,
    ) -> Result<Subscription, SubscriptionRepositoryError>;

    /// Deactivate a subscription
    async fn deactivate(&self, user_id: i64) -> Result<(), SubscriptionRepositoryError>;

    /// Consume one unit of a quota, returning the remaining amount;
    /// fails with `QuotaExhausted` when the counter is already zero
    async fn consume(
        &self,
        user_id: i64,
        kind: QuotaKind,
    ) -> Result<i32, SubscriptionRepositoryError>;
}
