pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod web;

use crate::application::accounts::{AccountUseCase, RegisterRequest};
use crate::application::market::MarketUseCase;
use crate::application::portfolio::PortfolioUseCase;
use crate::application::trading::TradingUseCase;
use crate::application::watchlist::{WatchView, WatchlistUseCase};
use crate::domain::entities::holding::Holding;
use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::entities::stock::Stock;
use crate::domain::entities::user::{Profile, User};
use crate::domain::entities::watch_item::WatchItem;
use crate::domain::error::DomainError;
use crate::domain::ports::account_repository::AccountRepository;
use crate::domain::ports::portfolio_repository::{PortfolioRepository, TradeReceipt};
use crate::domain::ports::quote_provider::QuoteProvider;
use crate::domain::ports::stock_repository::StockRepository;
use crate::domain::ports::watchlist_repository::WatchlistRepository;
use crate::domain::values::quote::Quote;
use crate::domain::values::valuation::{HoldingValuation, PortfolioSummary};
use crate::infrastructure::quotes::cache::{CachedQuotes, QUOTE_TTL};
use crate::infrastructure::quotes::fixed::FixedQuotes;
use crate::infrastructure::quotes::yahoo::YahooQuotes;
use crate::infrastructure::sqlite::account_repo::SqliteAccountRepo;
use crate::infrastructure::sqlite::open_database;
use crate::infrastructure::sqlite::portfolio_repo::SqlitePortfolioRepo;
use crate::infrastructure::sqlite::stock_repo::SqliteStockRepo;
use crate::infrastructure::sqlite::watchlist_repo::SqliteWatchlistRepo;
use std::sync::Arc;

/// Application facade: wires the SQLite stores and the quote provider into
/// the use cases and exposes one method per user-facing operation.
pub struct TradeX {
    accounts_uc: AccountUseCase,
    market_uc: Arc<MarketUseCase>,
    trading_uc: TradingUseCase,
    portfolio_uc: PortfolioUseCase,
    watchlist_uc: WatchlistUseCase,
}

impl TradeX {
    /// Provider selection from `TRADEX_QUOTE_PROVIDER` (`yahoo` is the
    /// default, `fixed` serves the built-in table for offline runs). The
    /// chosen provider is wrapped in the TTL quote cache.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let provider = std::env::var("TRADEX_QUOTE_PROVIDER").unwrap_or_else(|_| "yahoo".into());
        let quotes: Arc<dyn QuoteProvider> = match provider.as_str() {
            "fixed" => Arc::new(FixedQuotes::default()),
            _ => Arc::new(YahooQuotes::new()),
        };
        Self::with_providers(db_path, Arc::new(CachedQuotes::new(quotes, QUOTE_TTL)))
    }

    pub fn with_providers(
        db_path: &str,
        quotes: Arc<dyn QuoteProvider>,
    ) -> Result<Self, DomainError> {
        let conn = open_database(db_path)?;

        let accounts: Arc<dyn AccountRepository> = Arc::new(SqliteAccountRepo::new(conn.clone()));
        let stocks: Arc<dyn StockRepository> = Arc::new(SqliteStockRepo::new(conn.clone()));
        let portfolio: Arc<dyn PortfolioRepository> =
            Arc::new(SqlitePortfolioRepo::new(conn.clone()));
        let watchlist: Arc<dyn WatchlistRepository> = Arc::new(SqliteWatchlistRepo::new(conn));

        let market_uc = Arc::new(MarketUseCase::new(quotes, stocks.clone()));

        Ok(Self {
            accounts_uc: AccountUseCase::new(accounts),
            trading_uc: TradingUseCase::new(stocks, portfolio.clone(), market_uc.clone()),
            portfolio_uc: PortfolioUseCase::new(portfolio, market_uc.clone()),
            watchlist_uc: WatchlistUseCase::new(watchlist, market_uc.clone()),
            market_uc,
        })
    }

    // Accounts

    pub fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        self.accounts_uc.register(request)
    }

    pub fn authenticate(&self, phone: &str, password: &str) -> Result<User, DomainError> {
        self.accounts_uc.authenticate(phone, password)
    }

    pub fn user(&self, id: &str) -> Result<Option<User>, DomainError> {
        self.accounts_uc.user(id)
    }

    pub fn profile(&self, user_id: &str) -> Result<Profile, DomainError> {
        self.accounts_uc.profile(user_id)
    }

    // Trading

    pub async fn buy(
        &self,
        user_id: &str,
        stock_id: &str,
        quantity: i64,
    ) -> Result<(Stock, TradeReceipt), DomainError> {
        self.trading_uc.buy(user_id, stock_id, quantity).await
    }

    pub async fn sell(
        &self,
        user_id: &str,
        stock_id: &str,
        quantity: i64,
    ) -> Result<(Stock, TradeReceipt), DomainError> {
        self.trading_uc.sell(user_id, stock_id, quantity).await
    }

    pub fn history(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<(LedgerEntry, Stock)>, DomainError> {
        self.trading_uc.history(user_id, limit)
    }

    // Portfolio

    pub async fn holdings(&self, user_id: &str) -> Result<Vec<HoldingValuation>, DomainError> {
        self.portfolio_uc.holdings(user_id).await
    }

    pub fn holding(&self, user_id: &str, stock_id: &str) -> Result<Option<Holding>, DomainError> {
        self.portfolio_uc.holding(user_id, stock_id)
    }

    pub async fn portfolio_summary(&self, user_id: &str) -> Result<PortfolioSummary, DomainError> {
        self.portfolio_uc.summary(user_id).await
    }

    // Watchlist

    pub async fn watch(&self, user_id: &str, symbol: &str) -> Result<WatchItem, DomainError> {
        self.watchlist_uc.add(user_id, symbol).await
    }

    pub fn unwatch(&self, user_id: &str, item_id: &str) -> Result<(), DomainError> {
        self.watchlist_uc.remove(user_id, item_id)
    }

    pub async fn watchlist(&self, user_id: &str) -> Result<Vec<WatchView>, DomainError> {
        self.watchlist_uc.list(user_id).await
    }

    // Market

    pub async fn quote(&self, symbol: &str) -> Option<Quote> {
        self.market_uc.quote(symbol).await
    }

    pub async fn resolve_stock(&self, symbol: &str) -> Result<Stock, DomainError> {
        self.market_uc.resolve_stock(symbol).await
    }

    pub async fn market_overview(&self) -> Result<Vec<(Stock, Quote)>, DomainError> {
        self.market_uc.overview().await
    }

    pub async fn popular_stocks(&self) -> Result<Vec<(Stock, Quote)>, DomainError> {
        self.market_uc.popular().await
    }

    pub fn stock(&self, stock_id: &str) -> Result<Option<Stock>, DomainError> {
        self.trading_uc.stock(stock_id)
    }

    pub fn seed_catalog(&self) -> Result<usize, DomainError> {
        self.market_uc.seed_catalog()
    }
}
