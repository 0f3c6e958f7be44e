//! Biblical quotation detection and linking for rabbinic text.
//!
//! Given a Mishnah or Talmud segment, this crate finds candidate biblical
//! quotations and verifies each against the Scripture partition of the
//! lexical store:
//!
//! 1. **Extraction** ([`extract`]) — two independent extractors scan the
//!    segment: one for quotation-introducing phrases (שנאמר, דכתיב, ...),
//!    one for quote-mark-delimited spans. Overlapping candidates are
//!    deduplicated greedily, highest confidence first.
//! 2. **Linking** ([`link`]) — each surviving candidate becomes an
//!    all-tokens-required prefix query over Scripture; retrieved verses are
//!    re-scored by token overlap against the candidate, and a candidate is
//!    confirmed iff at least one verse passes the acceptance thresholds.
//! 3. **Reporting** ([`report`]) — scan rows and totals render into a
//!    sectioned Hebrew text report.
//!
//! All logic is synchronous and pure apart from the [`LexicalStore`] reads
//! performed during linking.
//!
//! [`LexicalStore`]: tanna_core::store::LexicalStore

pub mod candidate;
pub mod extract;
pub mod link;
pub mod report;

pub use candidate::{Confidence, ExtractionMethod, QuoteCandidate};
pub use extract::{
    Applicability, IntroPhraseExtractor, QuotationMarksExtractor, QuoteExtractor,
    dedup_candidates, detect_candidates,
};
pub use link::{
    LinkConfig, QuoteDetectionResult, QuoteLink, Verdict, detect_quotes, link_candidate,
};
pub use report::{QuoteScanRow, ReportOptions, ScanTotals, render_quote_report};
