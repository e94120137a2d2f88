// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::pending_payment::PendingPayment;

#[derive(Error, Debug)]
pub enum PendingPaymentRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PendingPaymentRepository: Send + Sync {
    /// Record the pending payment for a user, replacing any previous one
    async fn set(&self, user_id: i64, payment_id: &str) -> Result<(), PendingPaymentRepositoryError>;

    /// Get a user's pending payment
    async fn get(&self, user_id: i64)
        -> Result<Option<PendingPayment>, PendingPaymentRepositoryError>;

    /// Clear a user's pending payment after confirmation or cancellation
    async fn clear(&self, user_id: i64) -> Result<(), PendingPaymentRepositoryError>;
}
