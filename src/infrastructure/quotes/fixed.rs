use crate::domain::ports::quote_provider::{QuoteError, QuoteProvider};
use crate::domain::values::quote::Quote;
use async_trait::async_trait;
use std::collections::HashMap;

/// Deterministic quote source for tests and offline runs: a static table of
/// (name, last price, day open) per symbol.
pub struct FixedQuotes {
    table: HashMap<String, (String, f64, f64)>,
}

impl FixedQuotes {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn with_quote(mut self, symbol: &str, name: &str, last: f64, open: f64) -> Self {
        self.table
            .insert(symbol.to_uppercase(), (name.to_string(), last, open));
        self
    }
}

impl Default for FixedQuotes {
    fn default() -> Self {
        Self::empty()
            .with_quote("RELIANCE.NS", "Reliance Industries Ltd", 2540.35, 2521.00)
            .with_quote("TCS.NS", "Tata Consultancy Services", 3420.10, 3444.85)
            .with_quote("HDFCBANK.NS", "HDFC Bank Ltd", 1650.00, 1638.20)
            .with_quote("INFY.NS", "Infosys Ltd", 1480.50, 1475.00)
            .with_quote("ICICIBANK.NS", "ICICI Bank Ltd", 940.25, 951.40)
            .with_quote("RELIANCE", "Reliance Industries Ltd", 2540.35, 2521.00)
            .with_quote("TCS", "Tata Consultancy Services", 3420.10, 3444.85)
            .with_quote("HDFCBANK", "HDFC Bank Ltd", 1650.00, 1638.20)
            .with_quote("INFY", "Infosys Ltd", 1480.50, 1475.00)
            .with_quote("ICICIBANK", "ICICI Bank Ltd", 940.25, 951.40)
            .with_quote("AAPL", "Apple Inc.", 156.00, 154.10)
            .with_quote("TSLA", "Tesla Inc.", 210.00, 216.30)
            .with_quote("MSFT", "Microsoft Corporation", 415.20, 411.00)
            .with_quote("AMZN", "Amazon.com Inc.", 125.00, 123.75)
            .with_quote("GOOGL", "Alphabet Inc.", 138.40, 140.00)
            .with_quote("NVDA", "NVIDIA Corporation", 465.80, 452.15)
    }
}

#[async_trait]
impl QuoteProvider for FixedQuotes {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let key = symbol.trim().to_uppercase();
        match self.table.get(&key) {
            Some((name, last, open)) => Ok(Quote::from_prices(&key, name, *last, Some(*open))),
            None => Err(QuoteError::NoData(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_known_symbol() {
        let quotes = FixedQuotes::default();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let q = rt.block_on(quotes.fetch("aapl")).unwrap();
        assert_eq!(q.symbol, "AAPL");
        assert_eq!(q.price, dec!(156.00));
    }

    #[test]
    fn test_unknown_symbol() {
        let quotes = FixedQuotes::empty();
        let rt = tokio::runtime::Runtime::new().unwrap();
        assert!(rt.block_on(quotes.fetch("ZZZZ")).is_err());
    }
}
