// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

use crate::domain::{
    models::questionnaire::Questionnaire,
    repositories::questionnaire_repository::{QuestionnaireRepository, QuestionnaireRepositoryError},
};

use crate::infrastructure::database::entities::questionnaire;

pub struct QuestionnaireRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl QuestionnaireRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(model: questionnaire::Model) -> Questionnaire {
    Questionnaire {
        user_id: model.user_id,
        name: model.name,
        age: model.age,
        style: model.style,
        colors: model.colors,
    }
}

#[async_trait]
impl QuestionnaireRepository for QuestionnaireRepositoryImpl {
    async fn get(
        &self,
        user_id: i64,
    ) -> Result<Option<Questionnaire>, QuestionnaireRepositoryError> {
        let model = questionnaire::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| QuestionnaireRepositoryError::DatabaseError(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn upsert(
        &self,
        questionnaire: Questionnaire,
    ) -> Result<(), QuestionnaireRepositoryError> {
        let existing = questionnaire::Entity::find_by_id(questionnaire.user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| QuestionnaireRepositoryError::DatabaseError(e.to_string()))?;

        match existing {
            Some(model) => {
                let mut active: questionnaire::ActiveModel = model.into();
                active.name = Set(questionnaire.name);
                active.age = Set(questionnaire.age);
                active.style = Set(questionnaire.style);
                active.colors = Set(questionnaire.colors);
                active
                    .update(self.db.as_ref())
                    .await
                    .map_err(|e| QuestionnaireRepositoryError::DatabaseError(e.to_string()))?;
            }
            None => {
                let active = questionnaire::ActiveModel {
                    user_id: Set(questionnaire.user_id),
                    name: Set(questionnaire.name),
                    age: Set(questionnaire.age),
                    style: Set(questionnaire.style),
                    colors: Set(questionnaire.colors),
                };
                active
                    .insert(self.db.as_ref())
                    .await
                    .map_err(|e| QuestionnaireRepositoryError::DatabaseError(e.to_string()))?;
            }
        }

        Ok(())
    }

    async fn delete(&self, user_id: i64) -> Result<(), QuestionnaireRepositoryError> {
        questionnaire::Entity::delete_by_id(user_id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| QuestionnaireRepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
