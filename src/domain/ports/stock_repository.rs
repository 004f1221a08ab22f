use crate::domain::entities::stock::Stock;
use crate::domain::error::DomainError;

pub trait StockRepository: Send + Sync {
    /// Insert the symbol or refresh its display name. Idempotent on symbol.
    fn upsert(&self, symbol: &str, name: &str) -> Result<Stock, DomainError>;

    fn get(&self, id: &str) -> Result<Option<Stock>, DomainError>;

    fn get_by_symbol(&self, symbol: &str) -> Result<Option<Stock>, DomainError>;
}
