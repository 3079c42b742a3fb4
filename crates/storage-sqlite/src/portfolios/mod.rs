//! SQLite storage implementation for portfolios and their embedded assets.

mod model;
mod repository;

pub use model::{PortfolioAssetDB, PortfolioDB};
pub use repository::PortfolioRepository;
