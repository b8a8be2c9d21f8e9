//! Core arbitration services

pub mod consensus;
pub mod credibility;
pub mod evidence_aggregator;

pub use consensus::VerdictEngine;
pub use credibility::CredibilityScorer;
pub use evidence_aggregator::EvidenceAggregator;
