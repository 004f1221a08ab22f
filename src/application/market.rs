use crate::domain::entities::stock::Stock;
use crate::domain::error::DomainError;
use crate::domain::ports::quote_provider::QuoteProvider;
use crate::domain::ports::stock_repository::StockRepository;
use crate::domain::values::quote::Quote;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

/// Symbols shown in the dashboard market overview.
pub const MARKET_OVERVIEW_SYMBOLS: &[&str] = &[
    "RELIANCE.NS",
    "TCS.NS",
    "HDFCBANK.NS",
    "AAPL",
    "TSLA",
    "MSFT",
];

/// Suggested symbols on the watchlist page.
pub const POPULAR_SYMBOLS: &[&str] = &["INFY.NS", "ICICIBANK.NS", "AMZN", "GOOGL", "NVDA"];

/// Bulk seed for the stock catalog.
pub const CATALOG_SEED: &[(&str, &str)] = &[
    ("RELIANCE", "Reliance Industries Ltd"),
    ("TCS", "Tata Consultancy Services"),
    ("HDFCBANK", "HDFC Bank Ltd"),
    ("INFY", "Infosys Ltd"),
    ("ICICIBANK", "ICICI Bank Ltd"),
    ("AAPL", "Apple Inc."),
    ("TSLA", "Tesla Inc."),
    ("AMZN", "Amazon.com Inc."),
];

/// Market-data boundary: quote lookups plus symbol resolution into the
/// catalog. Provider failures are logged and surfaced as "no data" so every
/// caller treats a missing quote as an unknown price.
pub struct MarketUseCase {
    quotes: Arc<dyn QuoteProvider>,
    stocks: Arc<dyn StockRepository>,
}

impl MarketUseCase {
    pub fn new(quotes: Arc<dyn QuoteProvider>, stocks: Arc<dyn StockRepository>) -> Self {
        Self { quotes, stocks }
    }

    pub async fn quote(&self, symbol: &str) -> Option<Quote> {
        match self.quotes.fetch(symbol).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!("quote fetch failed for {symbol} via {}: {e}", self.quotes.name());
                None
            }
        }
    }

    pub async fn quotes(&self, symbols: &[String]) -> HashMap<String, Quote> {
        let mut results = HashMap::new();
        for symbol in symbols {
            if let Some(quote) = self.quote(symbol).await {
                results.insert(quote.symbol.clone(), quote);
            }
        }
        results
    }

    /// Resolve a symbol into a catalog stock, creating the entry from live
    /// data on first reference. `NotFound` when the provider has no data.
    pub async fn resolve_stock(&self, symbol: &str) -> Result<Stock, DomainError> {
        let symbol = symbol.trim().to_uppercase();
        match self.quote(&symbol).await {
            Some(quote) => self.stocks.upsert(&symbol, &quote.name),
            None => match self.stocks.get_by_symbol(&symbol)? {
                Some(stock) => Ok(stock),
                None => Err(DomainError::NotFound(format!("Stock not found: {symbol}"))),
            },
        }
    }

    /// Dashboard market overview: quoted stocks get-or-created into the
    /// catalog so their pages can link to buy flows.
    pub async fn overview(&self) -> Result<Vec<(Stock, Quote)>, DomainError> {
        self.quoted_catalog(MARKET_OVERVIEW_SYMBOLS).await
    }

    /// Suggestions for the watchlist page.
    pub async fn popular(&self) -> Result<Vec<(Stock, Quote)>, DomainError> {
        self.quoted_catalog(POPULAR_SYMBOLS).await
    }

    async fn quoted_catalog(&self, symbols: &[&str]) -> Result<Vec<(Stock, Quote)>, DomainError> {
        let mut out = Vec::new();
        for symbol in symbols {
            if let Some(quote) = self.quote(symbol).await {
                let stock = self.stocks.upsert(symbol, &quote.name)?;
                out.push((stock, quote));
            }
        }
        Ok(out)
    }

    /// Upsert the fixed catalog list. Returns the number of rows touched.
    pub fn seed_catalog(&self) -> Result<usize, DomainError> {
        for (symbol, name) in CATALOG_SEED {
            self.stocks.upsert(symbol, name)?;
        }
        Ok(CATALOG_SEED.len())
    }
}
