use crate::domain::ports::quote_provider::{QuoteError, QuoteProvider};
use crate::domain::values::quote::Quote;
use async_trait::async_trait;

/// Yahoo Finance quote source using the v8 chart API (no auth required).
pub struct YahooQuotes {
    client: reqwest::Client,
}

impl YahooQuotes {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for YahooQuotes {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, serde::Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Option<Vec<Option<f64>>>,
}

#[async_trait]
impl QuoteProvider for YahooQuotes {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn fetch(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}?range=1d&interval=1d"
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(QuoteError::Network(format!(
                "Yahoo API returned {} for {symbol}",
                resp.status()
            )));
        }

        let data: ChartResponse = resp
            .json()
            .await
            .map_err(|e| QuoteError::Parse(e.to_string()))?;

        if let Some(err) = data.chart.error {
            return Err(QuoteError::Parse(format!("Yahoo error: {err}")));
        }

        let results = data
            .chart
            .result
            .ok_or_else(|| QuoteError::Parse("No chart results".into()))?;
        let first = results
            .first()
            .ok_or_else(|| QuoteError::Parse("Empty chart results".into()))?;
        let meta = &first.meta;

        let price = meta
            .regular_market_price
            .ok_or_else(|| QuoteError::NoData(symbol.to_string()))?;

        // Day-open from the chart series; previous close as a fallback.
        let open = first
            .indicators
            .as_ref()
            .and_then(|i| i.quote.first())
            .and_then(|q| q.open.as_ref())
            .and_then(|opens| opens.iter().flatten().next().copied())
            .or(meta.chart_previous_close);

        let name = meta
            .short_name
            .as_deref()
            .or(meta.long_name.as_deref())
            .unwrap_or(&meta.symbol);

        Ok(Quote::from_prices(&meta.symbol, name, price, open))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let quotes = YahooQuotes::new();
        assert_eq!(quotes.name(), "yahoo_finance");
    }

    #[test]
    fn test_parse_chart_payload() {
        let payload = r#"{
            "chart": {
                "result": [{
                    "meta": {
                        "symbol": "AAPL",
                        "shortName": "Apple Inc.",
                        "regularMarketPrice": 110.0,
                        "chartPreviousClose": 105.0
                    },
                    "indicators": {
                        "quote": [{"open": [100.0]}]
                    }
                }],
                "error": null
            }
        }"#;
        let data: ChartResponse = serde_json::from_str(payload).unwrap();
        let first = &data.chart.result.unwrap()[0];
        assert_eq!(first.meta.regular_market_price, Some(110.0));
        let open = first
            .indicators
            .as_ref()
            .and_then(|i| i.quote.first())
            .and_then(|q| q.open.as_ref())
            .and_then(|o| o.iter().flatten().next().copied());
        assert_eq!(open, Some(100.0));
    }
}
