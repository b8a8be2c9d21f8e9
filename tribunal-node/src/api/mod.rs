//! HTTP API handlers

pub mod disputes;
pub mod health;

pub use disputes::{
    appeal_verdict, file_dispute, get_all_disputes, get_dispute, get_dispute_evidence, get_stats,
    resolve_dispute, submit_evidence,
};
pub use health::health;
