//! Portfolios module - domain models, services, and traits.

mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;


pub use portfolio_model::{AllocationType, Asset, AssetInput, NewPortfolio, Portfolio, PortfolioUpdate};
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
