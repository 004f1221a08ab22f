use crate::domain::entities::holding::Holding;
use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::entities::stock::Stock;
use crate::domain::error::DomainError;
use rust_decimal::Decimal;

/// State after a trade committed: the remaining position and cash balance.
#[derive(Debug, Clone)]
pub struct TradeReceipt {
    /// Zero when a sell closed out the holding.
    pub quantity: i64,
    pub avg_price: Decimal,
    pub balance: Decimal,
    /// price x quantity for this trade.
    pub total: Decimal,
}

pub trait PortfolioRepository: Send + Sync {
    /// Debit the balance, upsert the holding with a recomputed average cost
    /// and append a BUY ledger row, atomically. Rejects with
    /// `InsufficientBalance` leaving no state changed.
    fn execute_buy(
        &self,
        user_id: &str,
        stock_id: &str,
        quantity: i64,
        price: Decimal,
    ) -> Result<TradeReceipt, DomainError>;

    /// Credit the balance, decrement the holding (deleting it at zero) and
    /// append a SELL ledger row, atomically. Rejects with
    /// `InsufficientShares` leaving no state changed.
    fn execute_sell(
        &self,
        user_id: &str,
        stock_id: &str,
        quantity: i64,
        price: Decimal,
    ) -> Result<TradeReceipt, DomainError>;

    fn holdings_for_user(&self, user_id: &str) -> Result<Vec<(Holding, Stock)>, DomainError>;

    fn holding(&self, user_id: &str, stock_id: &str) -> Result<Option<Holding>, DomainError>;

    /// Ledger rows for a user, most recent first.
    fn ledger_for_user(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<(LedgerEntry, Stock)>, DomainError>;
}
