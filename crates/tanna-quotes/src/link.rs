//! Quote-to-Scripture linking.
//!
//! A [`QuoteCandidate`] is verified against the Tanakh partition of the
//! lexical store: its tokens become an all-required prefix match expression,
//! the top-K retrieved verses are re-scored by token overlap, and verses
//! passing both acceptance thresholds become [`QuoteLink`]s. A candidate is
//! [`Verdict::Confirmed`] iff at least one link is accepted.
//!
//! The overlap score divides by the *candidate's* token count, not the
//! verse's. A short exact sub-quotation of a long verse scores 1.0; a long
//! paraphrase sharing a few words with a short verse scores low.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tanna_core::error::{TannaError, TannaResult};
use tanna_core::normalize::tokenize;
use tanna_core::store::{LexicalStore, ScopeFilter};
use tanna_core::taxonomy::CollectionType;
use tanna_core::tracing_config::TARGET_PREFIX;

use crate::candidate::QuoteCandidate;
use crate::extract::detect_candidates;

/// Thresholds and budgets for the linking step.
///
/// # Environment Variable Overrides
///
/// | Variable                  | Field               | Default |
/// |---------------------------|---------------------|---------|
/// | `TANNA_QUOTE_TOP_K`       | `top_k`             | `5`     |
/// | `TANNA_QUOTE_MIN_SHARED`  | `min_shared_tokens` | `3`     |
/// | `TANNA_QUOTE_MIN_SCORE`   | `min_score`         | `0.45`  |
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// How many verses to retrieve per candidate.
    pub top_k: usize,
    /// Minimum shared-token count for an accepted link.
    pub min_shared_tokens: usize,
    /// Minimum overlap score for an accepted link (0.0–1.0).
    pub min_score: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_shared_tokens: 3,
            min_score: 0.45,
        }
    }
}

impl LinkConfig {
    /// Load overrides from environment variables.
    ///
    /// Only overrides fields for which environment variables are set.
    /// Invalid values are silently ignored (defaults are kept).
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(k) = env_parse::<usize>("TANNA_QUOTE_TOP_K") {
            if k > 0 {
                self.top_k = k;
            }
        }
        if let Some(n) = env_parse::<usize>("TANNA_QUOTE_MIN_SHARED") {
            self.min_shared_tokens = n;
        }
        if let Some(s) = env_parse::<f64>("TANNA_QUOTE_MIN_SCORE") {
            if (0.0..=1.0).contains(&s) {
                self.min_score = s;
            }
        }
        self
    }

    /// Check that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`TannaError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> TannaResult<()> {
        if self.top_k == 0 {
            return Err(TannaError::InvalidConfig {
                field: "top_k".into(),
                value: "0".into(),
                reason: "must retrieve at least one verse per candidate".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(TannaError::InvalidConfig {
                field: "min_score".into(),
                value: self.min_score.to_string(),
                reason: "must be between 0.0 and 1.0".into(),
            });
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|v| v.parse().ok())
}

/// One accepted verse match for a quote candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLink {
    /// The matched verse's reference in Scripture.
    pub target_ref: String,
    /// The matched verse's lexical-store id.
    pub target_id: String,
    /// Overlap score: shared tokens over candidate tokens, in [0, 1].
    pub score: f64,
    /// How many candidate tokens appear in the verse.
    pub shared_tokens: usize,
    /// The candidate's total token count (the score denominator).
    pub total_tokens: usize,
    /// The matched verse's display text.
    pub target_text: String,
}

/// Verification outcome of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// At least one verse passed the acceptance thresholds.
    Confirmed,
    /// No verse passed; the link list is empty.
    Unconfirmed,
}

/// One candidate with its verdict and ranked links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDetectionResult {
    /// The candidate under verification.
    pub candidate: QuoteCandidate,
    /// Confirmed iff `links` is non-empty.
    pub verdict: Verdict,
    /// Accepted links, ranked by score descending.
    pub links: Vec<QuoteLink>,
}

/// Verify one candidate against the Scripture partition of the store.
///
/// Returns the accepted links ranked by score descending, at most
/// `config.top_k` of them. A candidate with no tokens links to nothing.
///
/// # Errors
///
/// Propagates store failures unchanged; the linker never retries.
pub fn link_candidate(
    candidate: &QuoteCandidate,
    store: &dyn LexicalStore,
    config: &LinkConfig,
) -> TannaResult<Vec<QuoteLink>> {
    let words = tokenize(&candidate.raw);
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let match_expr = words
        .iter()
        .map(|w| format!("{w}*"))
        .collect::<Vec<_>>()
        .join(" AND ");
    let scope = ScopeFilter {
        collection: Some(CollectionType::Tanakh),
        ..ScopeFilter::default()
    };
    let rows = store.search_by_match(&match_expr, &scope, config.top_k)?;

    let mut links = Vec::new();
    for row in rows {
        let verse_tokens = tokenize(&row.text_norm);
        // Duplicated candidate tokens count once each, as typed.
        let shared = words
            .iter()
            .filter(|w| verse_tokens.iter().any(|t| t == *w))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let score = shared as f64 / words.len() as f64;
        if shared >= config.min_shared_tokens && score >= config.min_score {
            debug!(
                target: TARGET_PREFIX,
                target_ref = %row.ref_,
                shared_tokens = shared,
                score,
                "quote link accepted"
            );
            links.push(QuoteLink {
                target_ref: if row.ref_.is_empty() {
                    row.normalized_ref
                } else {
                    row.ref_
                },
                target_id: row.id,
                score,
                shared_tokens: shared,
                total_tokens: words.len(),
                target_text: row.text_plain,
            });
        }
    }

    links.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    links.truncate(config.top_k);
    Ok(links)
}

/// Detect candidates in one segment and verify each against Scripture.
///
/// # Errors
///
/// Propagates store failures from the linking step.
pub fn detect_quotes(
    text: &str,
    collection: Option<CollectionType>,
    store: &dyn LexicalStore,
    config: &LinkConfig,
) -> TannaResult<Vec<QuoteDetectionResult>> {
    let candidates = detect_candidates(text, collection);
    let mut results = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let links = link_candidate(&candidate, store, config)?;
        let verdict = if links.is_empty() {
            Verdict::Unconfirmed
        } else {
            Verdict::Confirmed
        };
        results.push(QuoteDetectionResult {
            candidate,
            verdict,
            links,
        });
    }
    debug!(
        target: TARGET_PREFIX,
        candidate_count = results.len(),
        confirmed_count = results
            .iter()
            .filter(|r| r.verdict == Verdict::Confirmed)
            .count(),
        "quote detection finished"
    );
    Ok(results)
}
