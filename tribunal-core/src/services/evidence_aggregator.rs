//! Evidence aggregation
//!
//! Assembles the bounded evidence bundle fed to the reasoning oracle: web
//! content for each evidence URL plus every stored evidence record for the
//! dispute. A failing URL contributes a failure-marker entry instead of
//! aborting the bundle; one bad link must never block resolution of the
//! rest.

use crate::fetch::WebFetcher;
use crate::types::{
    Dispute, Evidence, EvidenceBundle, PartyRole, SubmittedEvidenceItem, WebEvidenceItem,
};
use std::sync::Arc;

/// Per-item content caps keep the oracle prompt bounded
const WEB_CONTENT_MAX_CHARS: usize = 1500;
const SUBMITTED_CONTENT_MAX_CHARS: usize = 2000;

/// Builds the transient evidence bundle for one resolution attempt
pub struct EvidenceAggregator {
    fetcher: Arc<dyn WebFetcher>,
    max_evidence_urls: usize,
}

impl EvidenceAggregator {
    pub fn new(fetcher: Arc<dyn WebFetcher>, max_evidence_urls: usize) -> Self {
        Self {
            fetcher,
            max_evidence_urls,
        }
    }

    /// Build the bundle from the dispute's URLs and stored evidence
    ///
    /// The only side effects are the fetch calls; fetch failures are
    /// recovered here and never escape.
    pub async fn build_bundle(&self, dispute: &Dispute, evidence: &[Evidence]) -> EvidenceBundle {
        let mut bundle = EvidenceBundle::default();

        for url in dispute.evidence_urls.iter().take(self.max_evidence_urls) {
            let content = match self.fetcher.render_text(url).await {
                Ok(text) => truncate_chars(&text, WEB_CONTENT_MAX_CHARS),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Evidence URL fetch failed");
                    format!("Failed to fetch: {e}")
                }
            };
            bundle.web_evidence.push(WebEvidenceItem {
                url: url.clone(),
                content,
            });
        }

        for item in evidence {
            let submitted_by = if item.submitted_by == dispute.plaintiff {
                PartyRole::Plaintiff
            } else {
                PartyRole::Defendant
            };
            bundle.submitted_evidence.push(SubmittedEvidenceItem {
                evidence_type: item.evidence_type.clone(),
                content: truncate_chars(&item.content, SUBMITTED_CONTENT_MAX_CHARS),
                credibility: item.credibility_score,
                submitted_by,
            });
        }

        tracing::debug!(
            dispute_id = dispute.dispute_id,
            web_items = bundle.web_evidence.len(),
            submitted_items = bundle.submitted_evidence.len(),
            "Assembled evidence bundle"
        );
        bundle
    }
}

/// Truncate to a maximum number of characters on a char boundary
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
