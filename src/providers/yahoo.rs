use crate::pipeline::{CollaboratorError, MarketData, QuoteSnapshot};
use crate::reports::Symbol;

use async_trait::async_trait;

pub const DEFAULT_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

/// Market-data provider backed by a Yahoo-style quote endpoint.
///
/// `GET {quote_url}?symbols=S` answers
/// `{"quoteResponse": {"result": [ {..quote fields..} ]}}`; the first result
/// is the snapshot. An empty result list yields an empty snapshot.
pub struct YahooQuoteClient {
    http_client: reqwest::Client,
    quote_url: String,
}

impl YahooQuoteClient {
    pub fn new(http_client: reqwest::Client, quote_url: &str) -> Self {
        Self {
            http_client,
            quote_url: quote_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MarketData for YahooQuoteClient {
    async fn snapshot(&self, symbol: &Symbol) -> Result<QuoteSnapshot, CollaboratorError> {
        let url = format!(
            "{}?symbols={}",
            self.quote_url,
            urlencoding::encode(symbol.as_str())
        );
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(CollaboratorError::Status(response.status().as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        let quote = body
            .pointer("/quoteResponse/result/0")
            .cloned()
            .map(QuoteSnapshot)
            .unwrap_or_else(QuoteSnapshot::empty);

        tracing::debug!("Fetched quote for {} (empty: {})", symbol, quote.is_empty());
        Ok(quote)
    }
}
