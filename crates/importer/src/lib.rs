pub mod client;
pub mod error;
pub mod parse;
pub mod scrape;
pub mod seed;

pub use client::FederationClient;
pub use error::{ImporterError, Result};
pub use scrape::{ImportOutcome, ScrapeOrchestrator, ScrapeOutcome, ScrapeSummary};
