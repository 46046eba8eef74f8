use crate::pipeline::{CollaboratorError, ResearchUpstream, UpstreamResponse};
use crate::reports::Symbol;

use async_trait::async_trait;
use futures_util::StreamExt;

/// Upstream research endpoint reached over HTTP (`GET {base}/research?symbol=S`).
pub struct HttpResearchUpstream {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpResearchUpstream {
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ResearchUpstream for HttpResearchUpstream {
    async fn open(&self, symbol: &Symbol) -> Result<UpstreamResponse, CollaboratorError> {
        let url = format!(
            "{}/research?symbol={}",
            self.base_url,
            urlencoding::encode(symbol.as_str())
        );
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(CollaboratorError::from))
            .boxed();

        tracing::debug!("Upstream answered {} for {}", status, symbol);
        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
