//! Platform configuration constants
//!
//! Fixed at initialization and immutable thereafter; every bound the public
//! operations enforce comes from here.

use serde::{Deserialize, Serialize};

/// Platform constants for the arbitration core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TribunalConfig {
    /// Platform fee retained from each stake, in percent
    #[serde(default = "default_platform_fee_percent")]
    pub platform_fee_percent: u64,

    /// Minimum stake required to file a dispute
    #[serde(default = "default_min_stake")]
    pub min_stake: u64,

    /// Maximum evidence URLs accepted per dispute
    #[serde(default = "default_max_evidence_urls")]
    pub max_evidence_urls: usize,
}

fn default_platform_fee_percent() -> u64 {
    1
}

fn default_min_stake() -> u64 {
    10
}

fn default_max_evidence_urls() -> usize {
    5
}

impl Default for TribunalConfig {
    fn default() -> Self {
        Self {
            platform_fee_percent: default_platform_fee_percent(),
            min_stake: default_min_stake(),
            max_evidence_urls: default_max_evidence_urls(),
        }
    }
}
