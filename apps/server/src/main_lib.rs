//! Application state wiring and tracing setup.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use roboadvisor_core::admin::{AdminService, AdminServiceTrait};
use roboadvisor_core::allocation::{AllocationService, AllocationServiceTrait};
use roboadvisor_core::dashboard::{DashboardService, DashboardServiceTrait};
use roboadvisor_core::notifications::{NotificationService, NotificationServiceTrait};
use roboadvisor_core::portfolios::{PortfolioService, PortfolioServiceTrait};
use roboadvisor_core::quotes::{QuoteService, QuoteServiceTrait};
use roboadvisor_core::reports::{ReportService, ReportServiceTrait};
use roboadvisor_core::users::{UserService, UserServiceTrait};
use roboadvisor_core::valuation::{ValuationService, ValuationServiceTrait};
use roboadvisor_market_data::AlphaVantageProvider;
use roboadvisor_storage_sqlite::notifications::NotificationRepository;
use roboadvisor_storage_sqlite::portfolios::PortfolioRepository;
use roboadvisor_storage_sqlite::users::UserRepository;
use roboadvisor_storage_sqlite::{create_pool, init, run_migrations};

use crate::config::Config;

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
    pub admin_service: Arc<dyn AdminServiceTrait>,
    pub valuation_service: Arc<dyn ValuationServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("ROBO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;

    // Repositories
    let user_repository = Arc::new(UserRepository::new(pool.clone()));
    let portfolio_repository = Arc::new(PortfolioRepository::new(pool.clone()));
    let notification_repository = Arc::new(NotificationRepository::new(pool.clone()));

    // Quote access: one provider behind a shared freshness cache
    if config.alpha_vantage_api_key.is_empty() {
        tracing::warn!("ALPHA_VANTAGE_API_KEY is not set; quote fetches will fail");
    }
    let provider = Arc::new(AlphaVantageProvider::new(
        config.alpha_vantage_api_key.clone(),
    ));
    let quote_service: Arc<dyn QuoteServiceTrait> = Arc::new(QuoteService::new(provider));

    // Domain services
    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repository.clone()));
    let notification_service: Arc<dyn NotificationServiceTrait> =
        Arc::new(NotificationService::new(notification_repository.clone()));
    let allocation_service: Arc<dyn AllocationServiceTrait> =
        Arc::new(AllocationService::new(quote_service.clone()));
    let portfolio_service: Arc<dyn PortfolioServiceTrait> = Arc::new(PortfolioService::new(
        portfolio_repository.clone(),
        user_repository.clone(),
        allocation_service,
        quote_service.clone(),
        notification_service.clone(),
    ));
    let dashboard_service: Arc<dyn DashboardServiceTrait> = Arc::new(DashboardService::new(
        portfolio_repository.clone(),
        user_repository.clone(),
        notification_service.clone(),
    ));
    let report_service: Arc<dyn ReportServiceTrait> = Arc::new(ReportService::new(
        user_repository.clone(),
        portfolio_repository.clone(),
    ));
    let admin_service: Arc<dyn AdminServiceTrait> = Arc::new(AdminService::new(
        user_repository.clone(),
        portfolio_repository.clone(),
    ));
    let valuation_service: Arc<dyn ValuationServiceTrait> = Arc::new(ValuationService::new(
        portfolio_repository,
        quote_service.clone(),
        notification_service.clone(),
    ));

    Ok(Arc::new(AppState {
        user_service,
        portfolio_service,
        notification_service,
        quote_service,
        dashboard_service,
        report_service,
        admin_service,
        valuation_service,
    }))
}
