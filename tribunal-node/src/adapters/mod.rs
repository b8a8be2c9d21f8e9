//! Host adapters behind the core's collaborator traits

pub mod consensus;
pub mod ledger;
pub mod oracle_client;
pub mod web_fetcher;

pub use consensus::LocalQuorumRunner;
pub use ledger::OutboxLedger;
pub use oracle_client::CompletionOracle;
pub use web_fetcher::HttpFetcher;
