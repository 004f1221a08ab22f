//! Portfolio valuation.
//!
//! Pure functions combining holdings with live quotes. A holding with no
//! available quote is valued at its average cost, so a provider outage never
//! shows phantom gains or losses.

use crate::domain::entities::holding::Holding;
use crate::domain::entities::stock::Stock;
use crate::domain::values::quote::Quote;
use rust_decimal::Decimal;
use serde::Serialize;

/// One holding decorated with live market data.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingValuation {
    pub stock_id: String,
    pub symbol: String,
    pub name: String,
    pub quantity: i64,
    pub avg_price: Decimal,
    /// Live price, if the quote source had data.
    pub current_price: Option<Decimal>,
    pub invested: Decimal,
    pub market_value: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
}

/// Aggregate view across all of a user's holdings.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub pnl_percent: Decimal,
}

/// Value a single holding against an optional live quote.
pub fn value_holding(holding: &Holding, stock: &Stock, quote: Option<&Quote>) -> HoldingValuation {
    let quantity = Decimal::from(holding.quantity);
    let current_price = quote.map(|q| q.price);
    let effective_price = current_price.unwrap_or(holding.avg_price);

    let invested = holding.avg_price * quantity;
    let market_value = effective_price * quantity;
    let pnl = market_value - invested;
    let pnl_percent = if invested > Decimal::ZERO {
        (pnl / invested * Decimal::from(100)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    HoldingValuation {
        stock_id: stock.id.clone(),
        symbol: stock.symbol.clone(),
        name: stock.name.clone(),
        quantity: holding.quantity,
        avg_price: holding.avg_price,
        current_price,
        invested,
        market_value,
        pnl,
        pnl_percent,
    }
}

/// Roll individual valuations up into a portfolio summary.
pub fn summarize(valuations: &[HoldingValuation]) -> PortfolioSummary {
    let total_invested: Decimal = valuations.iter().map(|v| v.invested).sum();
    let current_value: Decimal = valuations.iter().map(|v| v.market_value).sum();
    let profit_loss = current_value - total_invested;
    let pnl_percent = if total_invested > Decimal::ZERO {
        (profit_loss / total_invested * Decimal::from(100)).round_dp(2)
    } else {
        Decimal::ZERO
    };
    PortfolioSummary {
        total_invested,
        current_value,
        profit_loss,
        pnl_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding(quantity: i64, avg_price: Decimal) -> Holding {
        Holding {
            id: "h1".into(),
            user_id: "u1".into(),
            stock_id: "s1".into(),
            quantity,
            avg_price,
        }
    }

    fn stock() -> Stock {
        Stock {
            id: "s1".into(),
            symbol: "AAPL".into(),
            name: "Apple Inc.".into(),
        }
    }

    fn quote(price: Decimal) -> Quote {
        Quote {
            symbol: "AAPL".into(),
            name: "Apple Inc.".into(),
            price,
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
        }
    }

    #[test]
    fn test_gain_against_live_price() {
        let v = value_holding(&holding(10, dec!(100)), &stock(), Some(&quote(dec!(150))));
        assert_eq!(v.invested, dec!(1000));
        assert_eq!(v.market_value, dec!(1500));
        assert_eq!(v.pnl, dec!(500));
        assert_eq!(v.pnl_percent, dec!(50.00));
    }

    #[test]
    fn test_missing_quote_falls_back_to_avg_cost() {
        let v = value_holding(&holding(10, dec!(100)), &stock(), None);
        assert_eq!(v.current_price, None);
        assert_eq!(v.market_value, dec!(1000));
        assert_eq!(v.pnl, Decimal::ZERO);
        assert_eq!(v.pnl_percent, Decimal::ZERO);
    }

    #[test]
    fn test_zero_avg_cost_guard() {
        let v = value_holding(&holding(10, Decimal::ZERO), &stock(), Some(&quote(dec!(5))));
        assert_eq!(v.pnl, dec!(50));
        assert_eq!(v.pnl_percent, Decimal::ZERO);
    }

    #[test]
    fn test_summary() {
        let vals = vec![
            value_holding(&holding(10, dec!(100)), &stock(), Some(&quote(dec!(150)))),
            value_holding(&holding(5, dec!(200)), &stock(), None),
        ];
        let s = summarize(&vals);
        assert_eq!(s.total_invested, dec!(2000));
        assert_eq!(s.current_value, dec!(2500));
        assert_eq!(s.profit_loss, dec!(500));
        assert_eq!(s.pnl_percent, dec!(25.00));
    }

    #[test]
    fn test_empty_summary() {
        let s = summarize(&[]);
        assert_eq!(s.total_invested, Decimal::ZERO);
        assert_eq!(s.pnl_percent, Decimal::ZERO);
    }
}
