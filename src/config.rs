//! Service Configuration
//!
//! Every option can be given as a flag or through its environment variable.
//! The research source is chosen at startup: an upstream URL selects the
//! streaming variant, otherwise an OpenAI key is required for the synchronous
//! one.

use crate::providers::openai::{DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_TEMPERATURE};
use crate::providers::yahoo::DEFAULT_QUOTE_URL;
use crate::providers::OpenAiConfig;

use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "research-pipeline")]
#[command(about = "Streams equity research reports and keeps them for later retrieval", long_about = None)]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "RESEARCH_BIND", default_value = "127.0.0.1:8787")]
    pub bind: SocketAddr,

    /// Base URL of an upstream research endpoint; enables the streaming variant.
    #[arg(long, env = "WORKER_URL")]
    pub upstream_url: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "RESEARCH_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "RESEARCH_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Quote endpoint used for market-data context.
    #[arg(long, env = "RESEARCH_QUOTE_URL", default_value = DEFAULT_QUOTE_URL)]
    pub quote_url: String,

    /// Base URL of a remote key/value service; defaults to in-process storage.
    #[arg(long, env = "RESEARCH_STORE_URL")]
    pub store_url: Option<String>,

    /// Expose the local store at /internal/kv for other nodes.
    #[arg(long, env = "RESEARCH_SERVE_STORE")]
    pub serve_store: bool,
}

/// Where `/research` gets its content from.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    Synchronous(OpenAiConfig),
    Streaming { upstream_url: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("either --upstream-url (WORKER_URL) or --openai-api-key (OPENAI_API_KEY) must be set")]
    NoResearchSource,
}

impl Config {
    pub fn source(&self) -> Result<SourceConfig, ConfigError> {
        if let Some(upstream_url) = &self.upstream_url {
            return Ok(SourceConfig::Streaming {
                upstream_url: upstream_url.clone(),
            });
        }

        match &self.openai_api_key {
            Some(api_key) => Ok(SourceConfig::Synchronous(OpenAiConfig {
                api_key: api_key.clone(),
                base_url: self.openai_base_url.clone(),
                model: self.model.clone(),
                temperature: self.temperature,
            })),
            None => Err(ConfigError::NoResearchSource),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_url_selects_streaming_source() {
        let config = Config::try_parse_from([
            "research-pipeline",
            "--upstream-url",
            "http://worker.local",
            "--openai-api-key",
            "sk-test",
        ])
        .unwrap();

        assert!(matches!(
            config.source().unwrap(),
            SourceConfig::Streaming { upstream_url } if upstream_url == "http://worker.local"
        ));
    }

    #[test]
    fn test_api_key_selects_synchronous_source_with_defaults() {
        let mut config =
            Config::try_parse_from(["research-pipeline", "--openai-api-key", "sk-test"]).unwrap();
        config.upstream_url = None;

        match config.source().unwrap() {
            SourceConfig::Synchronous(openai) => {
                assert_eq!(openai.api_key, "sk-test");
                assert_eq!(openai.base_url, DEFAULT_OPENAI_BASE_URL);
                assert_eq!(openai.model, DEFAULT_MODEL);
                assert_eq!(openai.temperature, DEFAULT_TEMPERATURE);
            }
            other => panic!("expected synchronous source, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let mut config = Config::try_parse_from(["research-pipeline"]).unwrap();
        config.upstream_url = None;
        config.openai_api_key = None;

        assert!(matches!(config.source(), Err(ConfigError::NoResearchSource)));
    }

    #[test]
    fn test_bind_and_store_flags() {
        let config = Config::try_parse_from([
            "research-pipeline",
            "--bind",
            "0.0.0.0:9000",
            "--store-url",
            "http://store.local:8787",
            "--serve-store",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.store_url.as_deref(), Some("http://store.local:8787"));
        assert!(config.serve_store);
    }
}
