use crate::application::market::MarketUseCase;
use crate::domain::entities::holding::Holding;
use crate::domain::error::DomainError;
use crate::domain::ports::portfolio_repository::PortfolioRepository;
use crate::domain::values::valuation::{self, HoldingValuation, PortfolioSummary};
use std::sync::Arc;

pub struct PortfolioUseCase {
    portfolio: Arc<dyn PortfolioRepository>,
    market: Arc<MarketUseCase>,
}

impl PortfolioUseCase {
    pub fn new(portfolio: Arc<dyn PortfolioRepository>, market: Arc<MarketUseCase>) -> Self {
        Self { portfolio, market }
    }

    /// All holdings for a user, valued against live quotes where available.
    pub async fn holdings(&self, user_id: &str) -> Result<Vec<HoldingValuation>, DomainError> {
        let rows = self.portfolio.holdings_for_user(user_id)?;
        let symbols: Vec<String> = rows.iter().map(|(_, s)| s.symbol.clone()).collect();
        let quotes = self.market.quotes(&symbols).await;

        Ok(rows
            .iter()
            .map(|(holding, stock)| {
                valuation::value_holding(holding, stock, quotes.get(&stock.symbol))
            })
            .collect())
    }

    pub fn holding(
        &self,
        user_id: &str,
        stock_id: &str,
    ) -> Result<Option<Holding>, DomainError> {
        self.portfolio.holding(user_id, stock_id)
    }

    pub async fn summary(&self, user_id: &str) -> Result<PortfolioSummary, DomainError> {
        let holdings = self.holdings(user_id).await?;
        Ok(valuation::summarize(&holdings))
    }
}
