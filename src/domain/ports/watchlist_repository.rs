use crate::domain::entities::stock::Stock;
use crate::domain::entities::watch_item::WatchItem;
use crate::domain::error::DomainError;

pub trait WatchlistRepository: Send + Sync {
    /// Idempotent: adding an already-watched stock returns the existing item.
    fn add(&self, user_id: &str, stock_id: &str) -> Result<WatchItem, DomainError>;

    /// Remove by item id, scoped to the owning user. `NotFound` when the
    /// entry does not exist or belongs to someone else.
    fn remove(&self, user_id: &str, item_id: &str) -> Result<(), DomainError>;

    fn list_for_user(&self, user_id: &str) -> Result<Vec<(WatchItem, Stock)>, DomainError>;
}
