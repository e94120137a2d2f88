// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

use crate::domain::{
    models::pending_payment::PendingPayment,
    repositories::pending_payment_repository::{
        PendingPaymentRepository, PendingPaymentRepositoryError,
    },
};

use crate::infrastructure::database::entities::pending_payment;

pub struct PendingPaymentRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PendingPaymentRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PendingPaymentRepository for PendingPaymentRepositoryImpl {
    async fn set(
        &self,
        user_id: i64,
        payment_id: &str,
    ) -> Result<(), PendingPaymentRepositoryError> {
        let existing = pending_payment::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| PendingPaymentRepositoryError::DatabaseError(e.to_string()))?;

        match existing {
            Some(model) => {
                let mut active: pending_payment::ActiveModel = model.into();
                active.payment_id = Set(payment_id.to_string());
                active
                    .update(self.db.as_ref())
                    .await
                    .map_err(|e| PendingPaymentRepositoryError::DatabaseError(e.to_string()))?;
            }
            None => {
                let active = pending_payment::ActiveModel {
                    user_id: Set(user_id),
                    payment_id: Set(payment_id.to_string()),
                };
                active
                    .insert(self.db.as_ref())
                    .await
                    .map_err(|e| PendingPaymentRepositoryError::DatabaseError(e.to_string()))?;
            }
        }

        Ok(())
    }

    async fn get(
        &self,
        user_id: i64,
    ) -> Result<Option<PendingPayment>, PendingPaymentRepositoryError> {
        let model = pending_payment::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| PendingPaymentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(model.map(|m| PendingPayment {
            user_id: m.user_id,
            payment_id: m.payment_id,
        }))
    }

    async fn clear(&self, user_id: i64) -> Result<(), PendingPaymentRepositoryError> {
        pending_payment::Entity::delete_by_id(user_id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| PendingPaymentRepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
