use crate::domain::values::quote::Quote;
use async_trait::async_trait;

/// External market-data source queried by ticker symbol.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    async fn fetch(&self, symbol: &str) -> Result<Quote, QuoteError>;
}

#[derive(Debug)]
pub enum QuoteError {
    /// HTTP or network error
    Network(String),
    /// Response parsing error
    Parse(String),
    /// Configuration error
    Config(String),
    /// Provider has no data for the symbol
    NoData(String),
}

impl std::fmt::Display for QuoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteError::Network(msg) => write!(f, "Network error: {msg}"),
            QuoteError::Parse(msg) => write!(f, "Parse error: {msg}"),
            QuoteError::Config(msg) => write!(f, "Config error: {msg}"),
            QuoteError::NoData(symbol) => write!(f, "No data for {symbol}"),
        }
    }
}

impl std::error::Error for QuoteError {}
