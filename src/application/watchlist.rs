use crate::application::market::MarketUseCase;
use crate::domain::entities::watch_item::WatchItem;
use crate::domain::error::DomainError;
use crate::domain::ports::watchlist_repository::WatchlistRepository;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// A watchlist row decorated with live market data where available.
#[derive(Debug, Clone, Serialize)]
pub struct WatchView {
    pub item_id: String,
    pub stock_id: String,
    pub symbol: String,
    pub name: String,
    pub price: Option<Decimal>,
    pub change_percent: Option<Decimal>,
}

pub struct WatchlistUseCase {
    watchlist: Arc<dyn WatchlistRepository>,
    market: Arc<MarketUseCase>,
}

impl WatchlistUseCase {
    pub fn new(watchlist: Arc<dyn WatchlistRepository>, market: Arc<MarketUseCase>) -> Self {
        Self { watchlist, market }
    }

    /// Resolve the symbol into the catalog, then idempotently track it.
    pub async fn add(&self, user_id: &str, symbol: &str) -> Result<WatchItem, DomainError> {
        let stock = self.market.resolve_stock(symbol).await?;
        self.watchlist.add(user_id, &stock.id)
    }

    /// Remove by entry id; ownership enforced by the store.
    pub fn remove(&self, user_id: &str, item_id: &str) -> Result<(), DomainError> {
        self.watchlist.remove(user_id, item_id)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<WatchView>, DomainError> {
        let rows = self.watchlist.list_for_user(user_id)?;
        let symbols: Vec<String> = rows.iter().map(|(_, s)| s.symbol.clone()).collect();
        let quotes = self.market.quotes(&symbols).await;

        Ok(rows
            .into_iter()
            .map(|(item, stock)| {
                let quote = quotes.get(&stock.symbol);
                WatchView {
                    item_id: item.id,
                    stock_id: stock.id,
                    symbol: stock.symbol,
                    name: stock.name,
                    price: quote.map(|q| q.price),
                    change_percent: quote.map(|q| q.change_percent),
                }
            })
            .collect())
    }
}
