use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A live market quote for one symbol. All amounts rounded to two decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    /// Absolute change relative to day open.
    pub change: Decimal,
    /// Percentage change relative to day open.
    pub change_percent: Decimal,
}

impl Quote {
    /// Build a quote from raw provider prices, computing change against the
    /// day-open price. Missing or zero open yields zero change.
    pub fn from_prices(symbol: &str, name: &str, last: f64, open: Option<f64>) -> Self {
        let price = decimal_from_f64(last);
        let (change, change_percent) = match open {
            Some(open) if open > 0.0 => {
                let change = last - open;
                (
                    decimal_from_f64(change),
                    decimal_from_f64(change / open * 100.0),
                )
            }
            _ => (Decimal::ZERO, Decimal::ZERO),
        };
        Quote {
            symbol: symbol.to_uppercase(),
            name: name.to_string(),
            price,
            change,
            change_percent,
        }
    }
}

fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or_default().round_dp(2)
}
