pub mod account_repository;
pub mod portfolio_repository;
pub mod quote_provider;
pub mod stock_repository;
pub mod watchlist_repository;
