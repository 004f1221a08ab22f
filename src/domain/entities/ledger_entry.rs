use crate::domain::values::trade_side::TradeSide;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Append-only record of a single executed trade. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub user_id: String,
    pub stock_id: String,
    pub quantity: i64,
    pub price: Decimal,
    pub side: TradeSide,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        user_id: &str,
        stock_id: &str,
        quantity: i64,
        price: Decimal,
        side: TradeSide,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            stock_id: stock_id.to_string(),
            quantity,
            price,
            side,
            created_at: Utc::now(),
        }
    }
}
