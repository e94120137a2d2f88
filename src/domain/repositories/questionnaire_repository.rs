// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::questionnaire::Questionnaire;

#[derive(Error, Debug)]
pub enum QuestionnaireRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait QuestionnaireRepository: Send + Sync {
    /// Get a user's questionnaire
    async fn get(&self, user_id: i64) -> Result<Option<Questionnaire>, QuestionnaireRepositoryError>;

    /// Create or update a questionnaire
    async fn upsert(&self, questionnaire: Questionnaire) -> Result<(), QuestionnaireRepositoryError>;

    /// Delete a user's questionnaire
    async fn delete(&self, user_id: i64) -> Result<(), QuestionnaireRepositoryError>;
}
