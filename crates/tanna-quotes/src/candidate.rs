//! Quote-candidate types shared by the extractors and the linker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which extraction strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionMethod {
    /// Text following a quotation-introducing phrase (שנאמר, דכתיב, ...).
    IntroPhrase,
    /// Text delimited by straight or gershayim-style quote marks.
    QuotationMarks,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntroPhrase => write!(f, "intro_phrase"),
            Self::QuotationMarks => write!(f, "quotation_marks"),
        }
    }
}

/// Confidence tier assigned by an extractor.
///
/// Tiers drive overlap deduplication: a higher-tier candidate is never
/// displaced by a lower-tier candidate covering the same span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Numeric rank; higher wins dedup.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A span of rabbinic text suspected of quoting Scripture, before
/// verification.
///
/// `start`/`end` are byte offsets into the scanned segment and cover the
/// extraction window; `raw` may be narrower than the window when the
/// extractor tightened to a quoted sub-span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteCandidate {
    /// Which extractor produced this candidate.
    pub method: ExtractionMethod,
    /// Window start, byte offset into the source segment.
    pub start: usize,
    /// Window end (exclusive), byte offset into the source segment.
    pub end: usize,
    /// The suspected quotation, as it appears in the source.
    pub raw: String,
    /// Matching-form text of `raw`.
    pub normalized: String,
    /// The signal that triggered extraction (introducer phrase, or "quotes").
    pub signal: String,
    /// Extractor confidence tier.
    pub confidence: Confidence,
}

impl QuoteCandidate {
    /// Whether two candidate windows intersect.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_ranks_are_ordered() {
        assert!(Confidence::High.rank() > Confidence::Medium.rank());
        assert!(Confidence::Medium.rank() > Confidence::Low.rank());
    }

    #[test]
    fn display_labels_are_snake_case() {
        assert_eq!(ExtractionMethod::IntroPhrase.to_string(), "intro_phrase");
        assert_eq!(Confidence::Medium.to_string(), "medium");
    }

    #[test]
    fn overlap_is_symmetric_and_exclusive_at_edges() {
        let make = |start, end| QuoteCandidate {
            method: ExtractionMethod::QuotationMarks,
            start,
            end,
            raw: String::new(),
            normalized: String::new(),
            signal: "quotes".into(),
            confidence: Confidence::Medium,
        };
        let a = make(0, 10);
        let b = make(5, 15);
        let c = make(10, 20);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn serde_round_trip() {
        let cand = QuoteCandidate {
            method: ExtractionMethod::IntroPhrase,
            start: 12,
            end: 40,
            raw: "ואהבת לרעך כמוך".into(),
            normalized: "ואהבת לרעכ כמוכ".into(),
            signal: "שנאמר".into(),
            confidence: Confidence::High,
        };
        let json = serde_json::to_string(&cand).unwrap();
        let back: QuoteCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cand);
    }
}
