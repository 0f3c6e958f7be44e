//! The intent-recognition rule cascade.
//!
//! [`plan_query`] evaluates an ordered list of [`PlanRule`]s over the
//! quote-normalized query; the first rule whose pattern matches wins and no
//! rule is retried. Unmatched queries fall through to the general-QA plan.
//! Rules are independent objects so each can be tested and reordered on its
//! own.
//!
//! Patterns are linguistic, not learned: a closed set of Hebrew interrogative
//! phrases, reference shapes, and keyword co-occurrences. Every produced plan
//! carries the matched rule name and any script-advisory notes in its debug
//! block.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use tanna_core::normalize::normalize_query_input;
use tanna_core::registry::WorkRegistry;
use tanna_core::taxonomy::CollectionType;
use tanna_core::tracing_config::TARGET_PREFIX;

use crate::messages::{ReasonCode, message};
use crate::scope::resolve_scope_node;
use crate::types::{
    Disambiguation, ExecutionStrategy, IntentLimits, ParsedRef, PlanDebug, PlanLimits, QueryIntent,
    QueryPlan, ScopeConstraint, ScopeNode,
};

static EXACT_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S+)\s+(\d+):(\d+)").unwrap_or_else(|e| panic!("{e}")));

static OCC_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(איפה מופיעה|היכן מופיע|היכן כתוב|הבא את כל המופעים|מופיע הביטוי|מופיעה המילה)")
        .unwrap_or_else(|e| panic!("{e}"))
});

// Wider than strictly needed after quote folding; covers straight, curly,
// geresh, and gershayim glyph families.
static QUOTED_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[\"\u{201C}\u{201D}'\u{05F3}\u{05F4}\u{2018}\u{2019}](.+?)[\"\u{201C}\u{201D}'\u{05F3}\u{05F4}\u{2018}\u{2019}]")
        .unwrap_or_else(|e| panic!("{e}"))
});

static SCOPE_B: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ב(\S+)").unwrap_or_else(|e| panic!("{e}")));

static CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"פרק\s+(\d+)").unwrap_or_else(|e| panic!("{e}")));

static CHAPTER_ABOUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:על מה מדבר|מה הנושא של)\s+פרק\s+(\d+)\s+ב(.+)")
        .unwrap_or_else(|e| panic!("{e}"))
});

static QUOTE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"משניות שמזכירות\s+(.+)").unwrap_or_else(|e| panic!("{e}")));

static MASEKHET_SCOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"במסכת\s+(\S+)").unwrap_or_else(|e| panic!("{e}")));

static SEDER_SCOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"בסדר\s+(\S+)").unwrap_or_else(|e| panic!("{e}")));

static LIST_WORKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(מסכתות|מסכתות במשנה|רשימה של כל המסכתות).*(מזכירות|מזכיר)")
        .unwrap_or_else(|e| panic!("{e}"))
});

static MENTION_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:מזכירות|מזכיר)\s+(.+)").unwrap_or_else(|e| panic!("{e}")));

static QUOTE_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(מצטט|מצטטים|ציטוט)").unwrap_or_else(|e| panic!("{e}")));

static PASUK_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(פסוק|פסוקים)").unwrap_or_else(|e| panic!("{e}")));

static TANAKH_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(תנ\"ך|מהתנ\"ך|מן התנ\"ך)").unwrap_or_else(|e| panic!("{e}"))
});

static HAS_LATIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Za-z]").unwrap_or_else(|e| panic!("{e}")));

static HAS_HEBREW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[א-ת]").unwrap_or_else(|e| panic!("{e}")));

/// Everything a rule may look at when deciding whether it matches.
#[derive(Debug)]
pub struct PlanContext<'a> {
    /// The quote-normalized, whitespace-squeezed query.
    pub query: &'a str,
    /// The live work registry.
    pub registry: &'a WorkRegistry,
    /// The result-size limits table.
    pub limits: &'a IntentLimits,
    /// Script-advisory notes computed once per query.
    pub notes: &'a [String],
}

/// One pattern rule of the cascade.
pub trait PlanRule: Send + Sync {
    /// The rule name recorded in the plan's debug block.
    fn name(&self) -> &'static str;

    /// Build a plan if this rule's pattern matches, else `None`.
    fn apply(&self, ctx: &PlanContext<'_>) -> Option<QueryPlan>;
}

/// Strip a terminal question/exclamation mark from a captured token.
fn trim_terminal(s: &str) -> &str {
    s.trim_end_matches(['?', '!']).trim()
}

/// Display name of a scope node for suggestion strings.
fn node_name(node: &ScopeNode) -> &str {
    match node {
        ScopeNode::Corpus(c) => c.as_str(),
        ScopeNode::Subcorpus(name) | ScopeNode::Work(name) => name,
    }
}

// ── Rule 1: exact reference ─────────────────────────────────────────────

/// `<token> <int>:<int>`.
pub struct ExactRefRule;

impl PlanRule for ExactRefRule {
    fn name(&self) -> &'static str {
        "EXACT_REF"
    }

    fn apply(&self, ctx: &PlanContext<'_>) -> Option<QueryPlan> {
        let caps = EXACT_REF.captures(ctx.query)?;
        let work_raw = caps.get(1)?.as_str();
        let chapter: u32 = caps.get(2)?.as_str().parse().ok()?;
        let verse: u32 = caps.get(3)?.as_str().parse().ok()?;
        let resolved = resolve_scope_node(work_raw, ctx.registry);
        let work = resolved
            .work
            .clone()
            .unwrap_or_else(|| work_raw.to_owned());
        let disambiguation = if resolved.work.is_none() {
            Some(Disambiguation::new(
                message(ReasonCode::UnknownBookOrTractate),
                vec![
                    "נסה לכתוב את שם הספר בעברית מלאה, למשל: \"בראשית 1:1\"".into(),
                    "לפרק בתנ\"ך כתוב: \"ישעיה 40:1\"".into(),
                    "למסכת משנה כתוב: \"ברכות 3:1\"".into(),
                ],
            ))
        } else {
            None
        };
        Some(QueryPlan {
            intent: QueryIntent::ExactRef,
            scope: ScopeConstraint {
                node: resolved.node,
                work: Some(work.clone()),
                chapter: None,
            },
            ref_: Some(ParsedRef {
                raw: format!("{work_raw} {chapter}:{verse}"),
                normalized_ref: format!("{work} {chapter}:{verse}"),
                work,
                chapter,
                verse,
            }),
            term: None,
            strategy: ExecutionStrategy::LexicalOnly,
            limits: PlanLimits {
                max_results: ctx.limits.exact_ref_max_results,
                max_synthesis_segments: ctx.limits.exact_ref_max_segments,
            },
            aggregate_works: false,
            disambiguation,
            debug: PlanDebug {
                matched_rule: self.name().to_owned(),
                notes: ctx.notes.to_vec(),
            },
        })
    }
}

// ── Rule 2: word occurrences ────────────────────────────────────────────

/// "Where does X appear", with a quoted or bare term, optional ב-scope and
/// optional chapter.
pub struct WordOccurrencesRule;

impl PlanRule for WordOccurrencesRule {
    fn name(&self) -> &'static str {
        "WORD_OCCURRENCES"
    }

    fn apply(&self, ctx: &PlanContext<'_>) -> Option<QueryPlan> {
        if !OCC_TRIGGER.is_match(ctx.query) {
            return None;
        }
        let term = QUOTED_TERM
            .captures(ctx.query)
            .and_then(|caps| caps.get(1))
            .map_or_else(
                || {
                    OCC_TRIGGER
                        .replace(ctx.query, "")
                        .trim()
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_owned()
                },
                |m| m.as_str().to_owned(),
            );
        let term = trim_terminal(&term).to_owned();

        let mut scope = ScopeConstraint::default();
        if let Some(caps) = SCOPE_B.captures(ctx.query) {
            if let Some(token) = caps.get(1) {
                let res = resolve_scope_node(trim_terminal(token.as_str()), ctx.registry);
                scope.node = res.node;
                scope.work = res.work;
            }
        }
        if let Some(caps) = CHAPTER.captures(ctx.query) {
            scope.chapter = caps.get(1).and_then(|m| m.as_str().parse().ok());
        }

        let disambiguation = match scope.chapter {
            Some(chapter) if scope.work.is_none() => {
                let place = scope.node.as_ref().map_or("ספר", node_name);
                Some(Disambiguation::new(
                    message(ReasonCode::ChapterNeedsWork),
                    vec![
                        format!("איפה מופיעה המילה \"{term}\" ב{place} פרק {chapter}?"),
                        format!("איפה מופיעה המילה \"{term}\" בנביאים בספר ישעיה פרק {chapter}?"),
                    ],
                ))
            }
            _ => None,
        };

        Some(QueryPlan {
            intent: QueryIntent::WordOccurrences,
            scope,
            ref_: None,
            term: Some(term),
            strategy: ExecutionStrategy::LexicalOnly,
            limits: PlanLimits {
                max_results: ctx.limits.word_occurrences_max_results,
                max_synthesis_segments: 0,
            },
            aggregate_works: false,
            disambiguation,
            debug: PlanDebug {
                matched_rule: self.name().to_owned(),
                notes: ctx.notes.to_vec(),
            },
        })
    }
}

// ── Rule 3: chapter topic ───────────────────────────────────────────────

/// "What does chapter N in W discuss".
pub struct ChapterAboutRule;

impl PlanRule for ChapterAboutRule {
    fn name(&self) -> &'static str {
        "CHAPTER_ABOUT"
    }

    fn apply(&self, ctx: &PlanContext<'_>) -> Option<QueryPlan> {
        let caps = CHAPTER_ABOUT.captures(ctx.query)?;
        let chapter: u32 = caps.get(1)?.as_str().parse().ok()?;
        let work_raw = trim_terminal(caps.get(2)?.as_str());
        let resolved = resolve_scope_node(work_raw, ctx.registry);
        let disambiguation = if resolved.work.is_none() {
            Some(Disambiguation::new(
                message(ReasonCode::ChapterUnknownWork),
                vec![
                    format!("על מה מדבר פרק {chapter} בישעיה?"),
                    format!("מה הנושא של פרק {chapter} בברכות?"),
                ],
            ))
        } else {
            None
        };
        Some(QueryPlan {
            intent: QueryIntent::ChapterAbout,
            scope: ScopeConstraint {
                node: resolved.node,
                work: resolved.work,
                chapter: Some(chapter),
            },
            ref_: None,
            term: None,
            strategy: ExecutionStrategy::HybridLexicalThenLlm,
            limits: PlanLimits {
                max_results: ctx.limits.chapter_about_max_results,
                max_synthesis_segments: ctx.limits.chapter_about_max_segments,
            },
            aggregate_works: false,
            disambiguation,
            debug: PlanDebug {
                matched_rule: self.name().to_owned(),
                notes: ctx.notes.to_vec(),
            },
        })
    }
}

// ── Rule 4: Mishnah passages mentioning an entity ───────────────────────

/// "משניות שמזכירות <entity>", with optional tractate or seder scope.
pub struct QuoteEntityRule;

impl PlanRule for QuoteEntityRule {
    fn name(&self) -> &'static str {
        "QUOTE_ENTITY"
    }

    fn apply(&self, ctx: &PlanContext<'_>) -> Option<QueryPlan> {
        let caps = QUOTE_ENTITY.captures(ctx.query)?;
        let mut term = trim_terminal(caps.get(1)?.as_str()).to_owned();
        // The entity ends where an explicit scope phrase begins.
        for scope_re in [&*MASEKHET_SCOPE, &*SEDER_SCOPE] {
            if let Some(m) = scope_re.find(&term) {
                term.truncate(m.start());
            }
        }
        let term = term.trim().to_owned();

        let mut scope = ScopeConstraint::default();
        if let Some(caps) = MASEKHET_SCOPE.captures(ctx.query) {
            if let Some(token) = caps.get(1) {
                let res = resolve_scope_node(trim_terminal(token.as_str()), ctx.registry);
                scope.node = res.node;
                scope.work = res.work;
            }
        }
        if let Some(caps) = SEDER_SCOPE.captures(ctx.query) {
            if let Some(token) = caps.get(1) {
                scope.node = Some(ScopeNode::Subcorpus(
                    trim_terminal(token.as_str()).to_owned(),
                ));
            }
        }

        Some(QueryPlan {
            intent: QueryIntent::QuoteEntity,
            scope,
            ref_: None,
            term: Some(term),
            strategy: ExecutionStrategy::LexicalOnly,
            limits: PlanLimits {
                max_results: ctx.limits.quote_entity_max_results,
                max_synthesis_segments: 0,
            },
            aggregate_works: false,
            disambiguation: None,
            debug: PlanDebug {
                matched_rule: self.name().to_owned(),
                notes: ctx.notes.to_vec(),
            },
        })
    }
}

// ── Rule 5: which tractates mention an entity ───────────────────────────

/// Tractate-list patterns plus a mention verb. Without an explicit במשנה the
/// collection is ambiguous (Mishnah vs Bavli) and the plan requires
/// disambiguation; with it, the scope is hard-set to the Mishnah.
pub struct ListWorksRule;

impl PlanRule for ListWorksRule {
    fn name(&self) -> &'static str {
        "LIST_WORKS_MENTIONING_ENTITY"
    }

    fn apply(&self, ctx: &PlanContext<'_>) -> Option<QueryPlan> {
        if !LIST_WORKS.is_match(ctx.query) {
            return None;
        }
        let limits = PlanLimits {
            max_results: ctx.limits.list_works_max_results,
            max_synthesis_segments: 0,
        };
        let debug = PlanDebug {
            matched_rule: self.name().to_owned(),
            notes: ctx.notes.to_vec(),
        };

        if !ctx.query.contains("במשנה") {
            return Some(QueryPlan {
                intent: QueryIntent::ListWorksMentioningEntity,
                scope: ScopeConstraint::default(),
                ref_: None,
                term: None,
                strategy: ExecutionStrategy::LexicalOnly,
                limits,
                aggregate_works: true,
                disambiguation: Some(Disambiguation::new(
                    message(ReasonCode::TractatesWhichCorpus),
                    vec![
                        "איזה מסכתות במשנה מזכירות את רבי עקיבא?".into(),
                        "איזה מסכתות בבבלי מזכירות את רבי עקיבא?".into(),
                    ],
                )),
                debug,
            });
        }

        let term = MENTION_ENTITY
            .captures(ctx.query)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| ctx.query.to_owned(), |m| m.as_str().to_owned());
        let term = trim_terminal(term.trim().strip_prefix("את ").unwrap_or(&term)).to_owned();

        Some(QueryPlan {
            intent: QueryIntent::ListWorksMentioningEntity,
            scope: ScopeConstraint {
                node: Some(ScopeNode::Corpus(CollectionType::Mishnah)),
                work: None,
                chapter: None,
            },
            ref_: None,
            term: Some(term),
            strategy: ExecutionStrategy::LexicalOnly,
            limits,
            aggregate_works: true,
            disambiguation: None,
            debug,
        })
    }
}

// ── Rule 6: corpus-wide quotation query ─────────────────────────────────

/// Co-occurrence of a quote term, a verse term, and an explicit Scripture
/// reference; requires a resolvable tractate scope.
pub struct CorpusQuoteRule;

impl PlanRule for CorpusQuoteRule {
    fn name(&self) -> &'static str {
        "CORPUS_QUOTE_QUERY"
    }

    fn apply(&self, ctx: &PlanContext<'_>) -> Option<QueryPlan> {
        if !(QUOTE_TERM.is_match(ctx.query)
            && PASUK_TERM.is_match(ctx.query)
            && TANAKH_REF.is_match(ctx.query))
        {
            return None;
        }

        let mut scope = ScopeConstraint::default();
        if let Some(caps) = MASEKHET_SCOPE.captures(ctx.query) {
            if let Some(token) = caps.get(1) {
                let res = resolve_scope_node(trim_terminal(token.as_str()), ctx.registry);
                scope.node = res.node;
                scope.work = res.work;
            }
        }

        let debug = PlanDebug {
            matched_rule: self.name().to_owned(),
            notes: ctx.notes.to_vec(),
        };
        if scope.work.is_none() {
            return Some(QueryPlan {
                intent: QueryIntent::CorpusQuoteQuery,
                scope,
                ref_: None,
                term: None,
                strategy: ExecutionStrategy::LexicalOnly,
                limits: PlanLimits {
                    max_results: 50,
                    max_synthesis_segments: 0,
                },
                aggregate_works: false,
                disambiguation: Some(Disambiguation::new(
                    message(ReasonCode::UnknownBookOrTractate),
                    vec!["תן לי את כל המשניות במסכת סוטה שמצטטים פסוק מהתנ\"ך".into()],
                )),
                debug,
            });
        }

        Some(QueryPlan {
            intent: QueryIntent::CorpusQuoteQuery,
            scope,
            ref_: None,
            term: None,
            strategy: ExecutionStrategy::LexicalOnly,
            limits: PlanLimits {
                max_results: 100,
                max_synthesis_segments: 0,
            },
            aggregate_works: false,
            disambiguation: None,
            debug,
        })
    }
}

/// The cascade, in priority order.
pub static RULES: &[&dyn PlanRule] = &[
    &ExactRefRule,
    &WordOccurrencesRule,
    &ChapterAboutRule,
    &QuoteEntityRule,
    &ListWorksRule,
    &CorpusQuoteRule,
];

fn script_notes(query: &str) -> Vec<String> {
    let has_latin = HAS_LATIN.is_match(query);
    let has_hebrew = HAS_HEBREW.is_match(query);
    if has_latin && !has_hebrew {
        vec![message(ReasonCode::HebrewOnly).to_owned()]
    } else if has_latin && has_hebrew {
        vec![message(ReasonCode::HebrewPreferred).to_owned()]
    } else {
        Vec::new()
    }
}

/// Plan one query with the default limits table.
#[must_use]
pub fn plan_query(query: &str, registry: &WorkRegistry) -> QueryPlan {
    plan_query_with(query, registry, &IntentLimits::default())
}

/// Plan one query: normalize, compute advisory notes, dispatch the cascade.
#[must_use]
pub fn plan_query_with(query: &str, registry: &WorkRegistry, limits: &IntentLimits) -> QueryPlan {
    let normalized = normalize_query_input(query);
    let notes = script_notes(&normalized);
    let ctx = PlanContext {
        query: &normalized,
        registry,
        limits,
        notes: &notes,
    };

    for rule in RULES {
        if let Some(plan) = rule.apply(&ctx) {
            debug!(
                target: TARGET_PREFIX,
                matched_rule = rule.name(),
                intent = %plan.intent,
                query_len = normalized.chars().count(),
                "query planned"
            );
            return plan;
        }
    }

    debug!(
        target: TARGET_PREFIX,
        matched_rule = "GENERAL_QA",
        query_len = normalized.chars().count(),
        "query fell through to general QA"
    );
    QueryPlan {
        intent: QueryIntent::GeneralQa,
        scope: ScopeConstraint::default(),
        ref_: None,
        term: None,
        strategy: ExecutionStrategy::SemanticOnly,
        limits: PlanLimits {
            max_results: limits.general_qa_top_k,
            max_synthesis_segments: 0,
        },
        aggregate_works: false,
        disambiguation: None,
        debug: PlanDebug {
            matched_rule: "GENERAL_QA".to_owned(),
            notes,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> WorkRegistry {
        WorkRegistry::from_entries([
            (
                CollectionType::Tanakh,
                vec!["Genesis", "Exodus", "Isaiah", "Psalms"],
            ),
            (
                CollectionType::Mishnah,
                vec!["Berakhot", "Sotah", "Avot", "Ketubot"],
            ),
            (CollectionType::Bavli, vec!["Shabbat"]),
        ])
    }

    // ── Rule 1: exact reference ─────────────────────────────────────────

    #[test]
    fn exact_ref_resolves_hebrew_book_name() {
        let plan = plan_query("בראשית 1:1", &registry());
        assert_eq!(plan.intent, QueryIntent::ExactRef);
        let ref_ = plan.ref_.unwrap();
        assert_eq!(ref_.normalized_ref, "Genesis 1:1");
        assert_eq!(ref_.work, "Genesis");
        assert!(plan.disambiguation.is_none());
        assert_eq!(plan.debug.matched_rule, "EXACT_REF");
    }

    #[test]
    fn exact_ref_with_unknown_work_requires_disambiguation() {
        let plan = plan_query("זוהר 2:3", &registry());
        assert_eq!(plan.intent, QueryIntent::ExactRef);
        let d = plan.disambiguation.unwrap();
        assert_eq!(d.reason, message(ReasonCode::UnknownBookOrTractate));
        assert_eq!(d.suggestions.len(), 3);
    }

    #[test]
    fn exact_ref_matches_tractate_references() {
        let plan = plan_query("ברכות 3:1", &registry());
        assert_eq!(plan.ref_.unwrap().normalized_ref, "Berakhot 3:1");
    }

    // ── Rule 2: word occurrences ────────────────────────────────────────

    #[test]
    fn quoted_term_extracted_across_glyph_families() {
        let reg = registry();
        let variants = [
            "איפה מופיעה המילה \"אור\" בנביאים",
            "איפה מופיעה המילה ״אור״ בנביאים",
            "איפה מופיעה המילה ׳אור׳ בנביאים",
            "איפה מופיעה המילה “אור” בנביאים",
        ];
        for query in variants {
            let plan = plan_query(query, &reg);
            assert_eq!(plan.intent, QueryIntent::WordOccurrences, "{query}");
            assert_eq!(plan.term.as_deref(), Some("אור"), "{query}");
            assert_eq!(
                plan.scope.node,
                Some(ScopeNode::Subcorpus("נביאים".into())),
                "{query}"
            );
        }
    }

    #[test]
    fn chapter_without_work_requires_disambiguation() {
        let plan = plan_query("איפה מופיעה המילה אור בפרק 3", &registry());
        assert_eq!(plan.intent, QueryIntent::WordOccurrences);
        assert_eq!(plan.scope.chapter, Some(3));
        assert!(plan.scope.work.is_none());
        let d = plan.disambiguation.unwrap();
        assert_eq!(d.reason, message(ReasonCode::ChapterNeedsWork));
        assert!(!d.suggestions.is_empty());
    }

    #[test]
    fn work_scope_with_chapter_needs_no_disambiguation() {
        let plan = plan_query("איפה מופיעה המילה \"אור\" בבראשית פרק 1", &registry());
        assert_eq!(plan.scope.work.as_deref(), Some("Genesis"));
        assert_eq!(plan.scope.chapter, Some(1));
        assert!(plan.disambiguation.is_none());
    }

    #[test]
    fn unquoted_term_is_first_word_after_the_trigger() {
        let plan = plan_query("היכן כתוב שלום", &registry());
        assert_eq!(plan.term.as_deref(), Some("שלום"));
    }

    // ── Rule 3: chapter topic ───────────────────────────────────────────

    #[test]
    fn chapter_about_resolves_tractate() {
        let plan = plan_query("על מה מדבר פרק 3 בברכות", &registry());
        assert_eq!(plan.intent, QueryIntent::ChapterAbout);
        assert_eq!(plan.scope.work.as_deref(), Some("Berakhot"));
        assert_eq!(plan.scope.chapter, Some(3));
        assert_eq!(plan.strategy, ExecutionStrategy::HybridLexicalThenLlm);
        assert!(plan.disambiguation.is_none());
    }

    #[test]
    fn chapter_about_unknown_work_requires_disambiguation() {
        let plan = plan_query("מה הנושא של פרק 2 בזוהר?", &registry());
        assert_eq!(plan.intent, QueryIntent::ChapterAbout);
        let d = plan.disambiguation.unwrap();
        assert_eq!(d.reason, message(ReasonCode::ChapterUnknownWork));
        assert!(d.suggestions.iter().any(|s| s.contains("פרק 2")));
    }

    // ── Rule 4: quote entity ────────────────────────────────────────────

    #[test]
    fn quote_entity_extracts_entity_and_tractate_scope() {
        let plan = plan_query("משניות שמזכירות רבי עקיבא במסכת סוטה", &registry());
        assert_eq!(plan.intent, QueryIntent::QuoteEntity);
        assert_eq!(plan.term.as_deref(), Some("רבי עקיבא"));
        assert_eq!(plan.scope.work.as_deref(), Some("Sotah"));
    }

    #[test]
    fn quote_entity_seder_scope_wins_the_node() {
        let plan = plan_query("משניות שמזכירות שבת בסדר מועד", &registry());
        assert_eq!(plan.scope.node, Some(ScopeNode::Subcorpus("מועד".into())));
        assert_eq!(plan.term.as_deref(), Some("שבת"));
    }

    // ── Rule 5: list works mentioning entity ────────────────────────────

    #[test]
    fn list_works_without_corpus_asks_which() {
        let plan = plan_query("איזה מסכתות מזכירות את רבי עקיבא?", &registry());
        assert_eq!(plan.intent, QueryIntent::ListWorksMentioningEntity);
        assert!(plan.aggregate_works);
        let d = plan.disambiguation.unwrap();
        assert_eq!(d.reason, message(ReasonCode::TractatesWhichCorpus));
        assert_eq!(d.suggestions.len(), 2);
    }

    #[test]
    fn list_works_in_mishnah_scopes_and_extracts_entity() {
        let plan = plan_query("איזה מסכתות במשנה מזכירות את רבי עקיבא?", &registry());
        assert!(plan.disambiguation.is_none());
        assert_eq!(
            plan.scope.node,
            Some(ScopeNode::Corpus(CollectionType::Mishnah))
        );
        assert_eq!(plan.term.as_deref(), Some("רבי עקיבא"));
        assert!(plan.aggregate_works);
    }

    // ── Rule 6: corpus quote query ──────────────────────────────────────

    #[test]
    fn corpus_quote_query_scopes_to_the_named_tractate() {
        let plan = plan_query(
            "תן לי את כל המשניות במסכת סוטה שמצטטים פסוק מהתנ\"ך",
            &registry(),
        );
        assert_eq!(plan.intent, QueryIntent::CorpusQuoteQuery);
        assert_eq!(plan.scope.work.as_deref(), Some("Sotah"));
        assert_eq!(plan.limits.max_results, 100);
        assert!(plan.disambiguation.is_none());
    }

    #[test]
    fn corpus_quote_query_accepts_gershayim_spelling() {
        let plan = plan_query(
            "תן לי את כל המשניות במסכת סוטה שמצטטים פסוק מהתנ״ך",
            &registry(),
        );
        assert_eq!(plan.intent, QueryIntent::CorpusQuoteQuery);
    }

    #[test]
    fn corpus_quote_query_without_tractate_requires_disambiguation() {
        let plan = plan_query("אילו משניות מצטטות פסוקים מן התנ\"ך", &registry());
        assert_eq!(plan.intent, QueryIntent::CorpusQuoteQuery);
        assert_eq!(plan.limits.max_results, 50);
        let d = plan.disambiguation.unwrap();
        assert_eq!(d.reason, message(ReasonCode::UnknownBookOrTractate));
    }

    // ── Fallback & notes ────────────────────────────────────────────────

    #[test]
    fn unmatched_query_falls_back_to_general_qa() {
        let plan = plan_query("מה המשמעות של צדקה?", &registry());
        assert_eq!(plan.intent, QueryIntent::GeneralQa);
        assert_eq!(plan.strategy, ExecutionStrategy::SemanticOnly);
        assert!(plan.scope.node.is_none());
        assert!(plan.disambiguation.is_none());
    }

    #[test]
    fn latin_only_query_gets_the_hebrew_only_note() {
        let plan = plan_query("where does light appear", &registry());
        assert_eq!(plan.intent, QueryIntent::GeneralQa);
        assert_eq!(plan.debug.notes, vec![message(ReasonCode::HebrewOnly)]);
    }

    #[test]
    fn mixed_script_query_gets_the_preferred_note() {
        let plan = plan_query("מה זה shalom", &registry());
        assert_eq!(plan.debug.notes, vec![message(ReasonCode::HebrewPreferred)]);
    }

    #[test]
    fn hebrew_query_gets_no_notes() {
        let plan = plan_query("בראשית 1:1", &registry());
        assert!(plan.debug.notes.is_empty());
    }

    #[test]
    fn first_matching_rule_wins() {
        // Contains both an exact reference and an occurrence trigger; the
        // reference rule is earlier in the cascade.
        let plan = plan_query("היכן כתוב בראשית 1:1", &registry());
        assert_eq!(plan.intent, QueryIntent::ExactRef);
    }
}
