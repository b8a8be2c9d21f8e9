//! # Tribunal Core
//!
//! Dispute arbitration core: collects evidence from two parties, asks a
//! non-deterministic reasoning oracle for a verdict, and gates that verdict
//! behind a structural/semantic acceptance protocol before it may touch
//! dispute state or move funds. Includes:
//! - Domain model (disputes, evidence, verdicts)
//! - Evidence aggregation and credibility scoring
//! - Validation rule engine (the "acceptable verdict" predicate)
//! - Verdict consensus engine (leader/validator over an opaque runner)
//! - Deterministic fund distribution
//! - Collaborator traits with SQLite and in-memory store implementations

pub mod config;
pub mod error;
pub mod fetch;
pub mod ledger;
pub mod oracle;
pub mod payout;
pub mod rules;
pub mod services;
pub mod store;
pub mod tribunal;
pub mod types;

pub use config::TribunalConfig;
pub use error::{Error, Result};
pub use tribunal::Tribunal;
