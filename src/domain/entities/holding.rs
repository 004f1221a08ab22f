use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's position in one stock: quantity plus volume-weighted average
/// cost. A holding only exists while its quantity is positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    pub user_id: String,
    pub stock_id: String,
    pub quantity: i64,
    pub avg_price: Decimal,
}

impl Holding {
    pub fn new(user_id: &str, stock_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            stock_id: stock_id.to_string(),
            quantity: 0,
            avg_price: Decimal::ZERO,
        }
    }

    /// Add shares at `price`, recomputing the volume-weighted average cost.
    /// Stored to two decimals, matching the ledger's money precision.
    pub fn apply_buy(&mut self, quantity: i64, price: Decimal) {
        let cost = price * Decimal::from(quantity);
        let new_quantity = self.quantity + quantity;
        self.avg_price = ((self.avg_price * Decimal::from(self.quantity)) + cost)
            / Decimal::from(new_quantity);
        self.avg_price = self.avg_price.round_dp(2);
        self.quantity = new_quantity;
    }

    /// Remove shares. Average cost is unchanged on sells; the caller is
    /// responsible for rejecting quantities above the held amount.
    pub fn apply_sell(&mut self, quantity: i64) {
        self.quantity -= quantity;
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_buy_sets_average() {
        let mut h = Holding::new("u1", "s1");
        h.apply_buy(10, dec!(100));
        assert_eq!(h.quantity, 10);
        assert_eq!(h.avg_price, dec!(100.00));
    }

    #[test]
    fn test_volume_weighted_average() {
        let mut h = Holding::new("u1", "s1");
        h.apply_buy(10, dec!(100));
        h.apply_buy(10, dec!(200));
        assert_eq!(h.quantity, 20);
        assert_eq!(h.avg_price, dec!(150.00));
    }

    #[test]
    fn test_sell_keeps_average() {
        let mut h = Holding::new("u1", "s1");
        h.apply_buy(10, dec!(100));
        h.apply_buy(10, dec!(200));
        h.apply_sell(5);
        assert_eq!(h.quantity, 15);
        assert_eq!(h.avg_price, dec!(150.00));
    }

    #[test]
    fn test_sell_to_zero() {
        let mut h = Holding::new("u1", "s1");
        h.apply_buy(3, dec!(50));
        h.apply_sell(3);
        assert!(h.is_empty());
    }

    #[test]
    fn test_average_rounds_to_cents() {
        let mut h = Holding::new("u1", "s1");
        h.apply_buy(3, dec!(10.00));
        h.apply_buy(1, dec!(11.00));
        // (30 + 11) / 4 = 10.25
        assert_eq!(h.avg_price, dec!(10.25));
        h.apply_buy(2, dec!(10.10));
        // (41 + 20.20) / 6 = 10.2 exactly
        assert_eq!(h.avg_price, dec!(10.20));
    }
}
