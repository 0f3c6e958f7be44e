//! Quote-candidate extraction over a single rabbinic text segment.
//!
//! Two independent extractors run over each segment:
//!
//! | Extractor | Signal | Confidence |
//! |-----------|--------|------------|
//! | [`IntroPhraseExtractor`] | a quotation-introducing phrase (שנאמר, דכתיב, ...) | High |
//! | [`QuotationMarksExtractor`] | a span delimited by `"` or `״` | Medium |
//!
//! Candidates from both are pooled, sorted by (confidence descending, start
//! ascending), and overlapping spans are deduplicated greedily: the first
//! candidate in that order claims its span and any later intersecting
//! candidate is dropped. Greedy interval selection trades optimal coverage
//! for the guarantee that a high-confidence candidate is never displaced by
//! a lower-confidence one.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use tanna_core::normalize::normalize_text;
use tanna_core::taxonomy::CollectionType;
use tanna_core::tracing_config::TARGET_PREFIX;

use crate::candidate::{Confidence, ExtractionMethod, QuoteCandidate};

/// Quotation-introducing phrases specific to Mishnaic style.
pub const MISHNAH_INTRO_PHRASES: [&str; 3] = ["שנאמר", "שנאמר בו", "שנאמר עליו"];

/// Quotation-introducing phrases common across rabbinic literature.
pub const GENERAL_INTRO_PHRASES: [&str; 6] =
    ["דכתיב", "כדכתיב", "שנאמר", "אמר קרא", "כתיב", "ככתוב"];

/// Maximum accepted candidate length, in normalized characters.
pub const MAX_QUOTE_LEN_CHARS: usize = 200;

/// Minimum accepted candidate length, in normalized characters.
pub const MIN_QUOTE_LEN_CHARS: usize = 8;

/// Minimum accepted word count.
pub const MIN_QUOTE_WORDS: usize = 2;

/// Maximum window scanned after an introducer phrase, in characters.
pub const INTRO_FOLLOW_WINDOW_CHARS: usize = 140;

/// Sentence-terminal punctuation that closes an introducer window.
const SENTENCE_STOPS: [char; 6] = ['.', ':', ';', '？', '！', '!'];

static QUOTED_SUBSPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["״](.+?)["״]"#).unwrap_or_else(|e| panic!("{e}")));

static MARKED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["״]([^"״]{4,200})["״]"#).unwrap_or_else(|e| panic!("{e}")));

/// Which segment kinds an extractor applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Runs over every segment.
    Any,
    /// Runs only over segments of one collection.
    Collection(CollectionType),
}

impl Applicability {
    fn accepts(self, collection: Option<CollectionType>) -> bool {
        match self {
            Self::Any => true,
            Self::Collection(wanted) => collection == Some(wanted),
        }
    }
}

/// One candidate-extraction strategy.
pub trait QuoteExtractor: Send + Sync {
    /// Which extraction method this strategy implements.
    fn method(&self) -> ExtractionMethod;

    /// Which segments this extractor runs over.
    fn applies_to(&self) -> Applicability;

    /// Extract candidates from one segment's display text.
    fn extract(&self, text: &str) -> Vec<QuoteCandidate>;
}

/// Accept an extracted span if its normalized form passes the length and
/// word-count filters; returns the candidate fields on success.
fn accept(extracted: &str) -> Option<(String, String)> {
    let raw = extracted.trim();
    let norm = normalize_text(raw);
    let len = norm.normalized.chars().count();
    if !(MIN_QUOTE_LEN_CHARS..=MAX_QUOTE_LEN_CHARS).contains(&len) {
        return None;
    }
    if norm.normalized.split_whitespace().count() < MIN_QUOTE_WORDS {
        return None;
    }
    Some((raw.to_owned(), norm.normalized))
}

/// Extractor for text following a quotation-introducing phrase.
///
/// For every introducer occurrence, takes the text up to the first
/// sentence-terminal stop or [`INTRO_FOLLOW_WINDOW_CHARS`], whichever is
/// shorter; if the window itself contains a quoted sub-span, tightens to it.
#[derive(Debug, Default)]
pub struct IntroPhraseExtractor;

impl QuoteExtractor for IntroPhraseExtractor {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::IntroPhrase
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Any
    }

    fn extract(&self, text: &str) -> Vec<QuoteCandidate> {
        let mut candidates = Vec::new();
        let mut scanned: Vec<&str> = Vec::new();
        for intro in MISHNAH_INTRO_PHRASES.iter().chain(&GENERAL_INTRO_PHRASES) {
            // The two phrase lists share entries; scan each phrase once.
            if scanned.contains(intro) {
                continue;
            }
            scanned.push(*intro);
            let mut search_from = 0;
            while let Some(rel) = text[search_from..].find(intro) {
                let window_start = search_from + rel + intro.len();
                let remainder = &text[window_start..];
                let stop = remainder.find(SENTENCE_STOPS).unwrap_or(remainder.len());
                let window_cap = remainder
                    .char_indices()
                    .nth(INTRO_FOLLOW_WINDOW_CHARS)
                    .map_or(remainder.len(), |(i, _)| i);
                let span = &remainder[..stop.min(window_cap)];

                let extracted = QUOTED_SUBSPAN
                    .captures(span)
                    .and_then(|caps| caps.get(1))
                    .map_or_else(|| span.trim(), |m| m.as_str());

                if let Some((raw, normalized)) = accept(extracted) {
                    candidates.push(QuoteCandidate {
                        method: ExtractionMethod::IntroPhrase,
                        start: window_start,
                        end: window_start + span.len(),
                        raw,
                        normalized,
                        signal: (*intro).to_owned(),
                        confidence: Confidence::High,
                    });
                }

                search_from = window_start;
            }
        }
        candidates
    }
}

/// Extractor for spans delimited by straight or gershayim-style quote marks.
#[derive(Debug, Default)]
pub struct QuotationMarksExtractor;

impl QuoteExtractor for QuotationMarksExtractor {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::QuotationMarks
    }

    fn applies_to(&self) -> Applicability {
        Applicability::Any
    }

    fn extract(&self, text: &str) -> Vec<QuoteCandidate> {
        let mut candidates = Vec::new();
        for caps in MARKED_SPAN.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(inner) = caps.get(1) else { continue };
            let Some((raw, normalized)) = accept(inner.as_str()) else {
                continue;
            };
            candidates.push(QuoteCandidate {
                method: ExtractionMethod::QuotationMarks,
                start: whole.start(),
                end: whole.end(),
                raw,
                normalized,
                signal: "quotes".to_owned(),
                confidence: Confidence::Medium,
            });
        }
        candidates
    }
}

/// Sort candidates by (confidence descending, start ascending) and drop any
/// candidate whose span intersects an earlier-kept one. Idempotent.
#[must_use]
pub fn dedup_candidates(mut candidates: Vec<QuoteCandidate>) -> Vec<QuoteCandidate> {
    candidates.sort_by(|a, b| {
        b.confidence
            .rank()
            .cmp(&a.confidence.rank())
            .then(a.start.cmp(&b.start))
    });
    let mut kept: Vec<QuoteCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept.iter().any(|k| candidate.overlaps(k)) {
            continue;
        }
        kept.push(candidate);
    }
    kept
}

/// Run every applicable extractor over one segment and deduplicate.
#[must_use]
pub fn detect_candidates(text: &str, collection: Option<CollectionType>) -> Vec<QuoteCandidate> {
    let extractors: [&dyn QuoteExtractor; 2] = [&IntroPhraseExtractor, &QuotationMarksExtractor];
    let mut pooled = Vec::new();
    for extractor in extractors {
        if extractor.applies_to().accepts(collection) {
            pooled.extend(extractor.extract(text));
        }
    }
    let deduped = dedup_candidates(pooled);
    debug!(
        target: TARGET_PREFIX,
        candidate_count = deduped.len(),
        "quote candidates extracted"
    );
    deduped
}
