use serde::{Deserialize, Serialize};

/// A tracked symbol on a user's watchlist, independent of holdings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchItem {
    pub id: String,
    pub user_id: String,
    pub stock_id: String,
}

impl WatchItem {
    pub fn new(user_id: &str, stock_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            stock_id: stock_id.to_string(),
        }
    }
}
