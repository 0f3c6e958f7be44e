//! The lexical full-text store seam.
//!
//! The core never performs I/O itself: every corpus read goes through the
//! [`LexicalStore`] trait. Implementations are expected to be synchronous
//! (the reference backend is an embedded full-text index); all operations
//! return ordered, finite result sets.
//!
//! Term arguments are always the **normalized** form produced by
//! [`normalize_text`](crate::normalize::normalize_text); implementations
//! apply inseparable-prefix expansion
//! ([`expand_prefixes`](crate::normalize::expand_prefixes)) so a search for
//! `אור` also matches `ואור` and `באור`.

use serde::{Deserialize, Serialize};

use crate::error::TannaResult;
use crate::taxonomy::CollectionType;

/// Optional scope restriction applied to store reads.
///
/// All fields are conjunctive: a populated filter matches segments satisfying
/// every present field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeFilter {
    /// Restrict to one collection.
    pub collection: Option<CollectionType>,
    /// Restrict to one canonical work.
    pub work: Option<String>,
    /// Restrict to a set of canonical works (division/seder expansion).
    pub work_in: Option<Vec<String>>,
    /// Restrict to references starting with this normalized prefix
    /// (e.g., `"Berakhot 3:"`).
    pub ref_prefix: Option<String>,
}

impl ScopeFilter {
    /// A filter matching everything.
    #[must_use]
    pub fn unscoped() -> Self {
        Self::default()
    }

    /// Whether a segment's identifying fields pass this filter.
    #[must_use]
    pub fn matches(&self, collection: CollectionType, work: &str, normalized_ref: &str) -> bool {
        if self.collection.is_some_and(|c| c != collection) {
            return false;
        }
        if self.work.as_deref().is_some_and(|w| w != work) {
            return false;
        }
        if self
            .work_in
            .as_ref()
            .is_some_and(|works| !works.iter().any(|w| w == work))
        {
            return false;
        }
        if self
            .ref_prefix
            .as_deref()
            .is_some_and(|p| !normalized_ref.starts_with(p))
        {
            return false;
        }
        true
    }
}

/// One stored corpus segment (a verse, a mishnah, a talmudic passage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRow {
    /// Stable segment identifier.
    pub id: String,
    /// Which collection the segment belongs to.
    pub collection: CollectionType,
    /// Canonical work name.
    pub work: String,
    /// Human-facing reference (e.g., `"Genesis 1:3"`).
    pub ref_: String,
    /// Normalized reference used for prefix reads.
    pub normalized_ref: String,
    /// Markup-stripped display text.
    pub text_plain: String,
    /// Matching-form text (marks stripped, finals folded).
    pub text_norm: String,
}

/// Per-work aggregate returned by counting operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCount {
    /// Which collection, when known.
    pub collection: Option<CollectionType>,
    /// Canonical work name.
    pub work: String,
    /// Matching segment count.
    pub count: u64,
}

/// Read interface of the embedded lexical full-text store.
///
/// # Contract
///
/// - Every operation is a pure read; results are ordered and finite.
/// - Failures are fatal [`TannaError::Store`](crate::error::TannaError)
///   values; the core never retries.
/// - `search_by_match` consumes match expressions of the form
///   `tok1* AND tok2* ...` — every token required, matched as a prefix term.
pub trait LexicalStore: Send + Sync {
    /// Segments containing the normalized term (prefix-expanded), up to `limit`.
    fn find_term(
        &self,
        term_norm: &str,
        scope: &ScopeFilter,
        limit: usize,
    ) -> TannaResult<Vec<SegmentRow>>;

    /// Total number of segments containing the normalized term.
    fn count_term(&self, term_norm: &str, scope: &ScopeFilter) -> TannaResult<u64>;

    /// Segments whose normalized reference starts with `ref_prefix`, ordered
    /// by reference, up to `limit`.
    fn get_by_prefix(
        &self,
        ref_prefix: &str,
        scope: &ScopeFilter,
        limit: usize,
    ) -> TannaResult<Vec<SegmentRow>>;

    /// The single segment with this exact normalized reference, if present.
    fn get_ref(&self, normalized_ref: &str) -> TannaResult<Option<SegmentRow>>;

    /// Per-work match counts for the normalized term, ordered by count
    /// descending, up to `limit` works.
    fn find_term_by_work(
        &self,
        term_norm: &str,
        scope: &ScopeFilter,
        limit: usize,
    ) -> TannaResult<Vec<WorkCount>>;

    /// Ranked segments for an all-tokens-required prefix match expression.
    /// Used only for Scripture quote linking.
    fn search_by_match(
        &self,
        match_expr: &str,
        scope: &ScopeFilter,
        top_k: usize,
    ) -> TannaResult<Vec<SegmentRow>>;

    /// Every (collection, work) pair present in storage with its segment
    /// count. Consumed once per process to build the work registry.
    fn list_works(&self) -> TannaResult<Vec<WorkCount>>;
}
