//! Evidence credibility scoring
//!
//! Single-shot oracle call rating one evidence item 0-100. Advisory only:
//! unlike verdict generation there is no retry and no consensus check, so a
//! garbled oracle response degrades to a neutral score instead of failing
//! the submission.

use crate::oracle::{Oracle, ResponseFormat};
use crate::services::evidence_aggregator::truncate_chars;
use std::sync::Arc;

/// Truncation caps for the prompt inputs
const CONTENT_MAX_CHARS: usize = 500;
const CONTEXT_MAX_CHARS: usize = 200;

/// Score returned when the oracle's response does not parse as an integer
pub const NEUTRAL_SCORE: u8 = 50;

/// Rates the credibility of a single evidence item
pub struct CredibilityScorer {
    oracle: Arc<dyn Oracle>,
}

impl CredibilityScorer {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Score one evidence item in [0,100]
    ///
    /// Oracle failures and unparseable responses both yield the neutral
    /// default; out-of-range integers are clamped.
    pub async fn score(&self, content: &str, evidence_type: &str, case_context: &str) -> u8 {
        let prompt = build_prompt(content, evidence_type, case_context);

        let response = match self.oracle.generate(&prompt, ResponseFormat::Text).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Credibility oracle call failed, using neutral score");
                return NEUTRAL_SCORE;
            }
        };

        parse_score(&response)
    }
}

fn build_prompt(content: &str, evidence_type: &str, case_context: &str) -> String {
    format!(
        r#"Rate the credibility of this evidence on a scale of 0-100:

Evidence Type: {evidence_type}
Content: {content}
Case Context: {context}

Consider:
1. Source reliability
2. Relevance to case
3. Potential for manipulation
4. Internal consistency
5. Specificity and detail

Return ONLY an integer between 0 and 100, nothing else."#,
        evidence_type = evidence_type,
        content = truncate_chars(content, CONTENT_MAX_CHARS),
        context = truncate_chars(case_context, CONTEXT_MAX_CHARS),
    )
}

/// Parse the oracle's reply as an integer, clamped into [0,100];
/// anything unparseable is the neutral default
fn parse_score(response: &str) -> u8 {
    match response.trim().parse::<i64>() {
        Ok(score) => score.clamp(0, 100) as u8,
        Err(_) => NEUTRAL_SCORE,
    }
}
