//! Collaborator Providers
//!
//! HTTP implementations of the pipeline's collaborator traits.
//!
//! - **`yahoo`**: Quote snapshots (`MarketData`).
//! - **`openai`**: Report text from a chat completions endpoint (`AnalysisGenerator`).
//! - **`upstream`**: A remote research endpoint with a streamed body (`ResearchUpstream`).
//!
//! None of them set timeouts or retry; a hung upstream is bounded only by the
//! caller or the transport.

pub mod openai;
pub mod upstream;
pub mod yahoo;

pub use openai::{OpenAiAnalysisClient, OpenAiConfig};
pub use upstream::HttpResearchUpstream;
pub use yahoo::YahooQuoteClient;
