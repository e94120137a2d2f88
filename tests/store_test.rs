// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

use stylescout::domain::models::questionnaire::Questionnaire;
use stylescout::domain::models::subscription::QuotaKind;
use stylescout::domain::repositories::pending_payment_repository::PendingPaymentRepository;
use stylescout::domain::repositories::questionnaire_repository::QuestionnaireRepository;
use stylescout::domain::repositories::subscription_repository::{
    SubscriptionRepository, SubscriptionRepositoryError,
};
use stylescout::infrastructure::repositories::pending_payment_repo_impl::PendingPaymentRepositoryImpl;
use stylescout::infrastructure::repositories::questionnaire_repo_impl::QuestionnaireRepositoryImpl;
use stylescout::infrastructure::repositories::subscription_repo_impl::SubscriptionRepositoryImpl;

async fn setup_db() -> Arc<DatabaseConnection> {
    // A single pooled connection keeps the in-memory database shared
    // across all statements of a test
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);

    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    Arc::new(db)
}

#[tokio::test]
async fn test_questionnaire_upsert_and_delete() {
    let db = setup_db().await;
    let repo = QuestionnaireRepositoryImpl::new(db);

    assert!(repo.get(100).await.unwrap().is_none());

    let mut questionnaire = Questionnaire::new(100);
    questionnaire.name = Some("Anna".to_string());
    questionnaire.age = Some(27);
    questionnaire.style = Some("casual".to_string());
    repo.upsert(questionnaire.clone()).await.unwrap();

    let stored = repo.get(100).await.unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("Anna"));
    assert_eq!(stored.age, Some(27));
    assert_eq!(stored.colors, None);

    questionnaire.colors = Some("black, beige".to_string());
    repo.upsert(questionnaire).await.unwrap();
    let stored = repo.get(100).await.unwrap().unwrap();
    assert_eq!(stored.colors.as_deref(), Some("black, beige"));

    repo.delete(100).await.unwrap();
    assert!(repo.get(100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_subscription_ensure_creates_inactive_defaults() {
    let db = setup_db().await;
    let repo = SubscriptionRepositoryImpl::new(db);

    let subscription = repo.ensure(7).await.unwrap();
    assert!(!subscription.active);
    assert_eq!(subscription.tariff, "month");
    assert_eq!(subscription.search_requests_left, 5);
    assert_eq!(subscription.outfit_analysis_left, 3);
    assert_eq!(subscription.advice_messages_left, 7);
    assert_eq!(subscription.duration_days, 30);

    // A second ensure returns the stored record instead of resetting it
    repo.consume(7, QuotaKind::AdviceMessages).await.unwrap();
    let again = repo.ensure(7).await.unwrap();
    assert_eq!(again.advice_messages_left, 6);
}

#[tokio::test]
async fn test_subscription_activation_resets_quotas() {
    let db = setup_db().await;
    let repo = SubscriptionRepositoryImpl::new(db);

    repo.ensure(8).await.unwrap();
    repo.consume(8, QuotaKind::SearchRequests).await.unwrap();

    let activated = repo.activate(8, "year", 365).await.unwrap();
    assert!(activated.active);
    assert_eq!(activated.tariff, "year");
    assert_eq!(activated.duration_days, 365);
    assert_eq!(activated.search_requests_left, 5);

    repo.deactivate(8).await.unwrap();
    assert!(!repo.get(8).await.unwrap().unwrap().active);
}

#[tokio::test]
async fn test_quota_consumption_until_exhausted() {
    let db = setup_db().await;
    let repo = SubscriptionRepositoryImpl::new(db);

    repo.activate(9, "month", 30).await.unwrap();

    for expected in (0..5).rev() {
        let remaining = repo.consume(9, QuotaKind::SearchRequests).await.unwrap();
        assert_eq!(remaining, expected);
    }

    assert!(matches!(
        repo.consume(9, QuotaKind::SearchRequests).await,
        Err(SubscriptionRepositoryError::QuotaExhausted {
            kind: QuotaKind::SearchRequests
        })
    ));

    // Other counters are untouched
    let subscription = repo.get(9).await.unwrap().unwrap();
    assert_eq!(subscription.outfit_analysis_left, 3);
}

#[tokio::test]
async fn test_consume_for_unknown_user_is_not_found() {
    let db = setup_db().await;
    let repo = SubscriptionRepositoryImpl::new(db);

    assert!(matches!(
        repo.consume(12345, QuotaKind::SearchRequests).await,
        Err(SubscriptionRepositoryError::NotFound(12345))
    ));
}

#[tokio::test]
async fn test_pending_payment_set_replace_clear() {
    let db = setup_db().await;
    let repo = PendingPaymentRepositoryImpl::new(db);

    assert!(repo.get(42).await.unwrap().is_none());

    repo.set(42, "pay_001").await.unwrap();
    assert_eq!(repo.get(42).await.unwrap().unwrap().payment_id, "pay_001");

    // A newer payment replaces the previous one
    repo.set(42, "pay_002").await.unwrap();
    assert_eq!(repo.get(42).await.unwrap().unwrap().payment_id, "pay_002");

    repo.clear(42).await.unwrap();
    assert!(repo.get(42).await.unwrap().is_none());

    // Clearing an absent record is a no-op
    repo.clear(42).await.unwrap();
}
