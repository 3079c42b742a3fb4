//! Integration tests for the SQLite repositories against a real database
//! file with migrations applied.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use roboadvisor_core::notifications::{NewNotification, NotificationRepositoryTrait};
use roboadvisor_core::portfolios::{
    AllocationType, Asset, Portfolio, PortfolioRepositoryTrait,
};
use roboadvisor_core::users::{NewUser, RiskTolerance, UserRepositoryTrait, UserRole};
use roboadvisor_storage_sqlite::notifications::NotificationRepository;
use roboadvisor_storage_sqlite::portfolios::PortfolioRepository;
use roboadvisor_storage_sqlite::users::UserRepository;
use roboadvisor_storage_sqlite::{create_pool, init, run_migrations, DbPool};

struct TestDb {
    // Held so the directory outlives the pool
    _dir: TempDir,
    pool: Arc<DbPool>,
}

fn setup() -> TestDb {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db_path = db_path.to_str().unwrap();
    init(db_path).unwrap();
    let pool = create_pool(db_path).unwrap();
    run_migrations(&pool).unwrap();
    TestDb { _dir: dir, pool }
}

async fn seed_user(pool: &Arc<DbPool>, email: &str) -> String {
    let repository = UserRepository::new(pool.clone());
    let user = repository
        .insert(NewUser {
            email: email.to_string(),
            name: Some("Test User".to_string()),
        })
        .await
        .unwrap();
    user.id
}

fn portfolio_for(user_id: &str, name: &str, assets: Vec<Asset>) -> Portfolio {
    let now = Utc::now();
    let value = Portfolio::value_of(&assets);
    Portfolio {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        risk_tolerance: RiskTolerance::Low,
        allocation_type: AllocationType::Automated,
        investment_amount: dec!(1000),
        value,
        assets,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_user_roundtrip_and_count() {
    let db = setup();
    let repository = UserRepository::new(db.pool.clone());

    let created = repository
        .insert(NewUser {
            email: "alice@example.com".to_string(),
            name: None,
        })
        .await
        .unwrap();
    assert_eq!(created.role, UserRole::User);
    assert_eq!(created.risk_tolerance, RiskTolerance::Moderate);

    let loaded = repository.get_by_id(&created.id).unwrap();
    assert_eq!(loaded, created);

    let by_email = repository.get_by_email("alice@example.com").unwrap();
    assert_eq!(by_email.unwrap().id, created.id);
    assert!(repository.get_by_email("nobody@example.com").unwrap().is_none());

    let mut updated = loaded;
    updated.goals = "Retire by 2040".to_string();
    updated.risk_tolerance = RiskTolerance::High;
    let updated = repository.update(updated).await.unwrap();
    assert_eq!(updated.goals, "Retire by 2040");
    assert_eq!(
        repository.get_by_id(&created.id).unwrap().risk_tolerance,
        RiskTolerance::High
    );

    assert_eq!(repository.count().unwrap(), 1);
}

#[tokio::test]
async fn test_portfolio_roundtrip_preserves_asset_order_and_decimals() {
    let db = setup();
    let user_id = seed_user(&db.pool, "bob@example.com").await;
    let repository = PortfolioRepository::new(db.pool.clone());

    let assets = vec![
        Asset::new("QQQ", 3, dec!(351.17)),
        Asset::new("BND", 12, dec!(72.05)),
        Asset::new("SPY", 1, dec!(448.73)),
    ];
    let portfolio = portfolio_for(&user_id, "Ordered", assets.clone());
    repository.insert(portfolio.clone()).await.unwrap();

    let loaded = repository.get_by_id(&portfolio.id).unwrap();
    assert_eq!(loaded.assets, assets);
    assert_eq!(loaded.value, portfolio.value);
    assert_eq!(loaded.risk_tolerance, RiskTolerance::Low);
    assert_eq!(loaded.allocation_type, AllocationType::Automated);
    assert_eq!(loaded.investment_amount, dec!(1000));

    assert_eq!(repository.count().unwrap(), 1);
    assert_eq!(repository.load_all().unwrap().len(), 1);
    assert_eq!(repository.list_by_user(&user_id).unwrap().len(), 1);
    assert!(repository.list_by_user("other").unwrap().is_empty());
}

#[tokio::test]
async fn test_save_valuation_replaces_prices_and_value_in_one_write() {
    let db = setup();
    let user_id = seed_user(&db.pool, "carol@example.com").await;
    let repository = PortfolioRepository::new(db.pool.clone());

    let portfolio = portfolio_for(
        &user_id,
        "Revalued",
        vec![Asset::new("SPY", 2, dec!(400)), Asset::new("BND", 5, dec!(100))],
    );
    repository.insert(portfolio.clone()).await.unwrap();

    let refreshed = vec![Asset::new("SPY", 2, dec!(410)), Asset::new("BND", 5, dec!(99))];
    let new_value = Portfolio::value_of(&refreshed);
    repository
        .save_valuation(&portfolio.id, &refreshed, new_value)
        .await
        .unwrap();

    let loaded = repository.get_by_id(&portfolio.id).unwrap();
    assert_eq!(loaded.assets, refreshed);
    assert_eq!(loaded.value, dec!(1315));
    // Untouched columns survive the valuation write
    assert_eq!(loaded.name, "Revalued");
    assert_eq!(loaded.investment_amount, dec!(1000));
}

#[tokio::test]
async fn test_update_replaces_asset_list() {
    let db = setup();
    let user_id = seed_user(&db.pool, "dave@example.com").await;
    let repository = PortfolioRepository::new(db.pool.clone());

    let mut portfolio = portfolio_for(
        &user_id,
        "Mutable",
        vec![Asset::new("SPY", 1, dec!(400))],
    );
    repository.insert(portfolio.clone()).await.unwrap();

    portfolio.name = "Renamed".to_string();
    portfolio.assets = vec![Asset::new("ARKK", 10, dec!(45.5))];
    portfolio.value = Portfolio::value_of(&portfolio.assets);
    repository.update(portfolio.clone()).await.unwrap();

    let loaded = repository.get_by_id(&portfolio.id).unwrap();
    assert_eq!(loaded.name, "Renamed");
    assert_eq!(loaded.assets, vec![Asset::new("ARKK", 10, dec!(45.5))]);
    assert_eq!(loaded.value, dec!(455));

    assert_eq!(repository.delete(&portfolio.id).await.unwrap(), 1);
    assert!(repository.get_by_id(&portfolio.id).is_err());
}

#[tokio::test]
async fn test_unread_listing_excludes_read_notifications() {
    let db = setup();
    let user_id = seed_user(&db.pool, "erin@example.com").await;
    let repository = NotificationRepository::new(db.pool.clone());

    let first = repository
        .insert(NewNotification {
            user_id: user_id.clone(),
            message: "Asset SPY in portfolio \"Growth\" changed by 6.25%.".to_string(),
        })
        .await
        .unwrap();
    let second = repository
        .insert(NewNotification {
            user_id: user_id.clone(),
            message: "Portfolio \"Growth\" changed by 5.10%.".to_string(),
        })
        .await
        .unwrap();
    assert!(!first.read);

    let unread = repository.list_unread(&user_id).unwrap();
    assert_eq!(unread.len(), 2);

    let marked = repository.mark_read(&first.id).await.unwrap();
    assert!(marked.read);

    let unread = repository.list_unread(&user_id).unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].id, second.id);

    // Read notifications are retained, just filtered from the unread view
    assert!(repository.get_by_id(&first.id).unwrap().read);
}
