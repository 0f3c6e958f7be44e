//! Plan and outcome types.
//!
//! A [`QueryPlan`] is built once per query by the planner, is immutable, and
//! is consumed exactly once by the executor. A [`PlanOutcome`] is what the
//! executor hands back: a terminal disambiguation request, a refusal, or an
//! answer with optional rows, citations, work aggregates, and quote-scan
//! results.

use std::fmt;

use serde::{Deserialize, Serialize};

use tanna_core::store::WorkCount;
use tanna_core::taxonomy::CollectionType;
use tanna_quotes::{QuoteScanRow, ScanTotals};

/// What the user is asking for, as recognized by the rule cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryIntent {
    /// A single `work chapter:verse` reference.
    ExactRef,
    /// Where does a word or phrase appear.
    WordOccurrences,
    /// What a given chapter discusses.
    ChapterAbout,
    /// Mishnah passages mentioning an entity.
    QuoteEntity,
    /// Which tractates mention an entity, with per-work counts.
    ListWorksMentioningEntity,
    /// Segments quoting Scripture within a scoped work.
    CorpusQuoteQuery,
    /// Anything the cascade did not recognize.
    GeneralQa,
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ExactRef => "EXACT_REF",
            Self::WordOccurrences => "WORD_OCCURRENCES",
            Self::ChapterAbout => "CHAPTER_ABOUT",
            Self::QuoteEntity => "QUOTE_ENTITY",
            Self::ListWorksMentioningEntity => "LIST_WORKS_MENTIONING_ENTITY",
            Self::CorpusQuoteQuery => "CORPUS_QUOTE_QUERY",
            Self::GeneralQa => "GENERAL_QA",
        };
        f.write_str(s)
    }
}

/// How the executor should retrieve evidence for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStrategy {
    /// The lexical store alone answers the plan.
    LexicalOnly,
    /// Only the external vector/LLM collaborator can answer.
    SemanticOnly,
    /// Lexical retrieval feeds an LLM synthesis step.
    HybridLexicalThenLlm,
}

/// A corpus location: a whole collection, a division or seder, or one work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeNode {
    /// One of the three collections.
    Corpus(CollectionType),
    /// A Scriptural division or a Mishnaic seder, by Hebrew name.
    Subcorpus(String),
    /// A single canonical work.
    Work(String),
}

/// The corpus subset a query is restricted to.
///
/// A chapter without a resolvable work is ill-formed; the planner turns that
/// combination into a disambiguation requirement rather than emitting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConstraint {
    /// Resolved corpus location, when any scope token resolved.
    pub node: Option<ScopeNode>,
    /// Canonical work, when the scope narrowed to one.
    pub work: Option<String>,
    /// Chapter number, when the query named one.
    pub chapter: Option<u32>,
}

/// A parsed `work chapter:verse` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRef {
    /// The reference as typed.
    pub raw: String,
    /// Canonical form `"<Work> <chapter>:<verse>"`.
    pub normalized_ref: String,
    /// Canonical work name (or the raw token when unresolved).
    pub work: String,
    /// Chapter number.
    pub chapter: u32,
    /// Verse number.
    pub verse: u32,
}

/// A terminal request for the caller to pick among explicit reformulations.
///
/// The executor must surface the reason and every suggestion verbatim and
/// must never proceed past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disambiguation {
    /// Why the plan cannot proceed.
    pub reason: String,
    /// Concrete reformulations, never empty.
    pub suggestions: Vec<String>,
}

impl Disambiguation {
    /// Build a disambiguation requirement. Suggestions must be non-empty.
    #[must_use]
    pub fn new(reason: impl Into<String>, suggestions: Vec<String>) -> Self {
        debug_assert!(!suggestions.is_empty(), "disambiguation needs suggestions");
        Self {
            reason: reason.into(),
            suggestions,
        }
    }
}

/// Which rule matched, plus advisory notes surfaced to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDebug {
    /// Name of the rule that produced the plan.
    pub matched_rule: String,
    /// Soft usability notes (e.g., non-Hebrew input).
    pub notes: Vec<String>,
}

/// Result-size limits attached to one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// Maximum result rows to fetch.
    pub max_results: usize,
    /// Maximum segments handed to LLM synthesis (0 = no synthesis).
    pub max_synthesis_segments: usize,
}

/// Default result-size limits per intent.
///
/// # Environment Variable Overrides
///
/// | Variable                          | Field                          | Default |
/// |-----------------------------------|--------------------------------|---------|
/// | `TANNA_EXACT_REF_MAX_RESULTS`     | `exact_ref_max_results`        | `20`    |
/// | `TANNA_OCCURRENCES_MAX_RESULTS`   | `word_occurrences_max_results` | `50`    |
/// | `TANNA_LIST_WORKS_MAX_RESULTS`    | `list_works_max_results`       | `100`   |
/// | `TANNA_GENERAL_QA_TOP_K`          | `general_qa_top_k`             | `8`     |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentLimits {
    pub exact_ref_max_results: usize,
    pub exact_ref_max_segments: usize,
    pub word_occurrences_max_results: usize,
    pub chapter_about_max_results: usize,
    pub chapter_about_max_segments: usize,
    pub quote_entity_max_results: usize,
    pub list_works_max_results: usize,
    pub general_qa_top_k: usize,
}

impl Default for IntentLimits {
    fn default() -> Self {
        Self {
            exact_ref_max_results: 20,
            exact_ref_max_segments: 10,
            word_occurrences_max_results: 50,
            chapter_about_max_results: 60,
            chapter_about_max_segments: 20,
            quote_entity_max_results: 50,
            list_works_max_results: 100,
            general_qa_top_k: 8,
        }
    }
}

impl IntentLimits {
    /// Load overrides from environment variables.
    ///
    /// Only overrides fields for which environment variables are set.
    /// Invalid values are silently ignored (defaults are kept).
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = env_parse("TANNA_EXACT_REF_MAX_RESULTS") {
            self.exact_ref_max_results = n;
        }
        if let Some(n) = env_parse("TANNA_OCCURRENCES_MAX_RESULTS") {
            self.word_occurrences_max_results = n;
        }
        if let Some(n) = env_parse("TANNA_LIST_WORKS_MAX_RESULTS") {
            self.list_works_max_results = n;
        }
        if let Some(n) = env_parse("TANNA_GENERAL_QA_TOP_K") {
            self.general_qa_top_k = n;
        }
        self
    }
}

fn env_parse(var: &str) -> Option<usize> {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
}

/// A typed, scoped execution plan for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Recognized intent.
    pub intent: QueryIntent,
    /// Corpus restriction.
    pub scope: ScopeConstraint,
    /// Parsed reference, for exact-reference plans.
    pub ref_: Option<ParsedRef>,
    /// Search term or entity, for term-driven plans.
    pub term: Option<String>,
    /// How the executor should retrieve evidence.
    pub strategy: ExecutionStrategy,
    /// Result-size limits.
    pub limits: PlanLimits,
    /// Whether results aggregate per work rather than per segment.
    pub aggregate_works: bool,
    /// Terminal disambiguation requirement, when planning could not resolve
    /// the scope.
    pub disambiguation: Option<Disambiguation>,
    /// Which rule matched, plus advisory notes.
    pub debug: PlanDebug,
}

/// One result row: a formatted reference and its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Formatted display reference.
    pub ref_: String,
    /// Display text of the segment.
    pub text: String,
}

/// A successful execution's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OkAnswer {
    /// Headline answer text.
    pub answer: String,
    /// Result rows, when the intent returns segments.
    pub rows: Vec<ResultRow>,
    /// Raw references backing the rows.
    pub citations: Vec<String>,
    /// Per-work aggregates, when the intent aggregates.
    pub works: Vec<WorkCount>,
    /// Scanned segments with quote detections, for quotation scans.
    pub quote_rows: Vec<QuoteScanRow>,
    /// Scan totals, for quotation scans.
    pub totals: Option<ScanTotals>,
    /// The plan that produced this answer.
    pub plan: QueryPlan,
}

impl OkAnswer {
    /// An answer with only headline text; optional fields start empty.
    #[must_use]
    pub fn new(answer: impl Into<String>, plan: QueryPlan) -> Self {
        Self {
            answer: answer.into(),
            rows: Vec::new(),
            citations: Vec::new(),
            works: Vec::new(),
            quote_rows: Vec::new(),
            totals: None,
            plan,
        }
    }
}

/// What the executor hands back for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanOutcome {
    /// The caller must choose among the suggestions before any data is
    /// fetched.
    DisambiguationRequired {
        message: String,
        suggestions: Vec<String>,
    },
    /// A well-scoped query with zero matching evidence.
    Refusal { message: String },
    /// A successful answer.
    Ok(OkAnswer),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> QueryPlan {
        QueryPlan {
            intent: QueryIntent::ExactRef,
            scope: ScopeConstraint {
                node: Some(ScopeNode::Work("Genesis".into())),
                work: Some("Genesis".into()),
                chapter: None,
            },
            ref_: Some(ParsedRef {
                raw: "בראשית 1:1".into(),
                normalized_ref: "Genesis 1:1".into(),
                work: "Genesis".into(),
                chapter: 1,
                verse: 1,
            }),
            term: None,
            strategy: ExecutionStrategy::LexicalOnly,
            limits: PlanLimits {
                max_results: 20,
                max_synthesis_segments: 10,
            },
            aggregate_works: false,
            disambiguation: None,
            debug: PlanDebug {
                matched_rule: "EXACT_REF".into(),
                notes: Vec::new(),
            },
        }
    }

    #[test]
    fn intent_display_is_screaming_snake() {
        assert_eq!(QueryIntent::ExactRef.to_string(), "EXACT_REF");
        assert_eq!(
            QueryIntent::ListWorksMentioningEntity.to_string(),
            "LIST_WORKS_MENTIONING_ENTITY"
        );
    }

    #[test]
    fn plan_serde_round_trip() {
        let plan = sample_plan();
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"EXACT_REF\""));
        assert!(json.contains("\"LEXICAL_ONLY\""));
        let back: QueryPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn scope_node_serde_is_tagged() {
        let node = ScopeNode::Subcorpus("נביאים".into());
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"SUBCORPUS\""));
        let back: ScopeNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn outcome_serde_is_discriminated() {
        let refusal = PlanOutcome::Refusal {
            message: "אין".into(),
        };
        let json = serde_json::to_string(&refusal).unwrap();
        assert!(json.contains("\"REFUSAL\""));
        let ok = PlanOutcome::Ok(OkAnswer::new("נמצא", sample_plan()));
        let json = serde_json::to_string(&ok).unwrap();
        let back: PlanOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ok);
    }

    #[test]
    fn default_limits_are_positive() {
        let limits = IntentLimits::default();
        assert!(limits.exact_ref_max_results > 0);
        assert!(limits.word_occurrences_max_results > 0);
        assert!(limits.list_works_max_results > 0);
        assert!(limits.general_qa_top_k > 0);
    }

    #[test]
    fn ok_answer_starts_with_empty_optionals() {
        let ans = OkAnswer::new("נמצאו 3 תוצאות", sample_plan());
        assert!(ans.rows.is_empty());
        assert!(ans.works.is_empty());
        assert!(ans.quote_rows.is_empty());
        assert!(ans.totals.is_none());
    }
}
