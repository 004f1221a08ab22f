use crate::application::market::MarketUseCase;
use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::entities::stock::Stock;
use crate::domain::error::DomainError;
use crate::domain::ports::portfolio_repository::{PortfolioRepository, TradeReceipt};
use crate::domain::ports::stock_repository::StockRepository;
use rust_decimal::Decimal;
use std::sync::Arc;

/// The trade executor: validates a requested buy/sell against balance or
/// held quantity and applies balance, holding and ledger updates as one
/// atomic unit (delegated to the portfolio store).
pub struct TradingUseCase {
    stocks: Arc<dyn StockRepository>,
    portfolio: Arc<dyn PortfolioRepository>,
    market: Arc<MarketUseCase>,
}

impl TradingUseCase {
    pub fn new(
        stocks: Arc<dyn StockRepository>,
        portfolio: Arc<dyn PortfolioRepository>,
        market: Arc<MarketUseCase>,
    ) -> Self {
        Self {
            stocks,
            portfolio,
            market,
        }
    }

    pub async fn buy(
        &self,
        user_id: &str,
        stock_id: &str,
        quantity: i64,
    ) -> Result<(Stock, TradeReceipt), DomainError> {
        let stock = self.require_stock(stock_id)?;
        let quantity = positive_quantity(quantity)?;
        let price = self.execution_price(&stock).await;
        let receipt = self
            .portfolio
            .execute_buy(user_id, &stock.id, quantity, price)?;
        Ok((stock, receipt))
    }

    pub async fn sell(
        &self,
        user_id: &str,
        stock_id: &str,
        quantity: i64,
    ) -> Result<(Stock, TradeReceipt), DomainError> {
        let stock = self.require_stock(stock_id)?;
        let quantity = positive_quantity(quantity)?;
        let price = self.execution_price(&stock).await;
        let receipt = self
            .portfolio
            .execute_sell(user_id, &stock.id, quantity, price)?;
        Ok((stock, receipt))
    }

    pub fn history(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<(LedgerEntry, Stock)>, DomainError> {
        self.portfolio.ledger_for_user(user_id, limit)
    }

    pub fn stock(&self, stock_id: &str) -> Result<Option<Stock>, DomainError> {
        self.stocks.get(stock_id)
    }

    fn require_stock(&self, stock_id: &str) -> Result<Stock, DomainError> {
        self.stocks
            .get(stock_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Stock not found: {stock_id}")))
    }

    /// Live price, or zero when the quote source has no data.
    async fn execution_price(&self, stock: &Stock) -> Decimal {
        self.market
            .quote(&stock.symbol)
            .await
            .map(|q| q.price)
            .unwrap_or(Decimal::ZERO)
    }
}

fn positive_quantity(quantity: i64) -> Result<i64, DomainError> {
    if quantity < 1 {
        return Err(DomainError::InvalidInput(
            "Quantity must be a positive whole number.".into(),
        ));
    }
    Ok(quantity)
}
