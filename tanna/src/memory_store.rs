//! A dependency-free in-memory [`LexicalStore`].
//!
//! Faithful to the store contract of the embedded full-text backend:
//! prefix-term matching with inseparable-prefix expansion, conjunctive scope
//! filters, reference-ordered prefix reads, and all-tokens-required match
//! expressions. Serves tests, dry planning, and demos.

use std::collections::BTreeMap;

use tanna_core::error::TannaResult;
use tanna_core::normalize::{expand_prefixes, normalize_text};
use tanna_core::store::{LexicalStore, ScopeFilter, SegmentRow, WorkCount};
use tanna_core::taxonomy::CollectionType;

/// In-memory segment collection implementing the lexical-store contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    segments: Vec<SegmentRow>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one segment; text is normalized on the way in, and the
    /// canonical reference doubles as the normalized reference.
    pub fn insert(&mut self, collection: CollectionType, work: &str, ref_: &str, text: &str) {
        let norm = normalize_text(text);
        self.segments.push(SegmentRow {
            id: format!("{collection}:{ref_}"),
            collection,
            work: work.to_owned(),
            ref_: ref_.to_owned(),
            normalized_ref: ref_.to_owned(),
            text_plain: norm.plain,
            text_norm: norm.normalized,
        });
    }

    /// How many segments are stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the store holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn scoped<'a>(&'a self, scope: &'a ScopeFilter) -> impl Iterator<Item = &'a SegmentRow> {
        self.segments
            .iter()
            .filter(move |s| scope.matches(s.collection, &s.work, &s.normalized_ref))
    }
}

/// Whether the normalized text matches any prefix-expanded variant.
///
/// A variant is a word sequence; all words but the last must appear exactly,
/// the last as a token prefix (mirroring the full-text backend, where the
/// prefix star binds to the final token).
fn matches_any_prefix(text_norm: &str, variants: &[String]) -> bool {
    let tokens: Vec<&str> = text_norm.split_whitespace().collect();
    variants.iter().any(|variant| {
        let words: Vec<&str> = variant.split_whitespace().collect();
        let Some((last, exact)) = words.split_last() else {
            return false;
        };
        exact.iter().all(|w| tokens.iter().any(|t| t == w))
            && tokens.iter().any(|t| t.starts_with(last))
    })
}

impl LexicalStore for MemoryStore {
    fn find_term(
        &self,
        term_norm: &str,
        scope: &ScopeFilter,
        limit: usize,
    ) -> TannaResult<Vec<SegmentRow>> {
        let variants = expand_prefixes(term_norm);
        Ok(self
            .scoped(scope)
            .filter(|s| matches_any_prefix(&s.text_norm, &variants))
            .take(limit)
            .cloned()
            .collect())
    }

    fn count_term(&self, term_norm: &str, scope: &ScopeFilter) -> TannaResult<u64> {
        let variants = expand_prefixes(term_norm);
        Ok(self
            .scoped(scope)
            .filter(|s| matches_any_prefix(&s.text_norm, &variants))
            .count() as u64)
    }

    fn get_by_prefix(
        &self,
        ref_prefix: &str,
        scope: &ScopeFilter,
        limit: usize,
    ) -> TannaResult<Vec<SegmentRow>> {
        let mut rows: Vec<SegmentRow> = self
            .scoped(scope)
            .filter(|s| s.normalized_ref.starts_with(ref_prefix))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.ref_.cmp(&b.ref_));
        rows.truncate(limit);
        Ok(rows)
    }

    fn get_ref(&self, normalized_ref: &str) -> TannaResult<Option<SegmentRow>> {
        Ok(self
            .segments
            .iter()
            .find(|s| s.normalized_ref == normalized_ref)
            .cloned())
    }

    fn find_term_by_work(
        &self,
        term_norm: &str,
        scope: &ScopeFilter,
        limit: usize,
    ) -> TannaResult<Vec<WorkCount>> {
        let variants = expand_prefixes(term_norm);
        let mut counts: BTreeMap<(CollectionType, String), u64> = BTreeMap::new();
        for segment in self
            .scoped(scope)
            .filter(|s| matches_any_prefix(&s.text_norm, &variants))
        {
            *counts
                .entry((segment.collection, segment.work.clone()))
                .or_default() += 1;
        }
        let mut works: Vec<WorkCount> = counts
            .into_iter()
            .map(|((collection, work), count)| WorkCount {
                collection: Some(collection),
                work,
                count,
            })
            .collect();
        works.sort_by(|a, b| b.count.cmp(&a.count).then(a.work.cmp(&b.work)));
        works.truncate(limit);
        Ok(works)
    }

    fn search_by_match(
        &self,
        match_expr: &str,
        scope: &ScopeFilter,
        top_k: usize,
    ) -> TannaResult<Vec<SegmentRow>> {
        let prefixes: Vec<&str> = match_expr
            .split(" AND ")
            .map(|t| t.trim().trim_end_matches('*'))
            .filter(|t| !t.is_empty())
            .collect();
        if prefixes.is_empty() {
            return Ok(Vec::new());
        }
        let mut scored: Vec<(usize, &SegmentRow)> = self
            .scoped(scope)
            .filter_map(|s| {
                let tokens: Vec<&str> = s.text_norm.split_whitespace().collect();
                let all_match = prefixes
                    .iter()
                    .all(|p| tokens.iter().any(|t| t.starts_with(p)));
                if !all_match {
                    return None;
                }
                let exact = prefixes
                    .iter()
                    .filter(|p| tokens.iter().any(|t| t == *p))
                    .count();
                Some((exact, s))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.normalized_ref.cmp(&b.1.normalized_ref)));
        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(_, s)| s.clone())
            .collect())
    }

    fn list_works(&self) -> TannaResult<Vec<WorkCount>> {
        let mut counts: BTreeMap<(CollectionType, String), u64> = BTreeMap::new();
        for segment in &self.segments {
            *counts
                .entry((segment.collection, segment.work.clone()))
                .or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|((collection, work), count)| WorkCount {
                collection: Some(collection),
                work,
                count,
            })
            .collect())
    }
}
