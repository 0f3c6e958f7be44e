//! Plan execution against the lexical store.
//!
//! The executor is a dispatcher: it assembles a [`ScopeFilter`] from the
//! plan's scope, performs the per-intent store reads, and wraps the results
//! in a [`PlanOutcome`]. It never second-guesses the planner — a plan
//! carrying a disambiguation requirement is returned verbatim, never
//! downgraded to a best-effort guess — and a well-scoped query with zero
//! matching rows becomes a refusal, never an empty success.

use tracing::{debug, info};

use tanna_core::error::TannaResult;
use tanna_core::normalize::normalize_text;
use tanna_core::registry::WorkRegistry;
use tanna_core::store::{LexicalStore, ScopeFilter, SegmentRow};
use tanna_core::taxonomy::CollectionType;
use tanna_core::tracing_config::TARGET_PREFIX;
use tanna_planner::messages::{ReasonCode, message};
use tanna_planner::render::format_ref;
use tanna_planner::types::{OkAnswer, PlanOutcome, QueryIntent, QueryPlan, ResultRow, ScopeNode};
use tanna_planner::scope::expand_subcorpus;
use tanna_quotes::{LinkConfig, QuoteScanRow, ScanTotals, Verdict, detect_quotes};

/// The general-QA collaborator seam.
///
/// Invoked only for the fallback intent; the executor treats the answer as
/// opaque and propagates failures unchanged.
pub trait GeneralAnswerer: Send + Sync {
    /// Answer an open-ended query, or refuse.
    ///
    /// # Errors
    ///
    /// Implementations surface backend failures as
    /// [`TannaError::Collaborator`](tanna_core::error::TannaError).
    fn answer(&self, query: &str) -> TannaResult<PlanOutcome>;
}

/// Execution-time collaborators and tuning.
#[derive(Default)]
pub struct ExecuteOptions<'a> {
    /// Collaborator for the general-QA fallback; absent means such queries
    /// are refused.
    pub general_answerer: Option<&'a dyn GeneralAnswerer>,
    /// Thresholds for quotation scans.
    pub link_config: LinkConfig,
}

/// Assemble the store filter implied by a plan's scope.
///
/// A resolved work pins the work and its collection; a corpus node pins the
/// collection; a division/seder node expands to its ingested members; a
/// chapter alongside a work becomes a reference prefix.
fn build_scope_filter(plan: &QueryPlan, registry: &WorkRegistry) -> ScopeFilter {
    let mut filter = ScopeFilter::default();
    if let Some(work) = &plan.scope.work {
        filter.work = Some(work.clone());
        filter.collection = registry.collection_of(work);
    } else {
        match &plan.scope.node {
            Some(ScopeNode::Corpus(collection)) => filter.collection = Some(*collection),
            Some(node @ ScopeNode::Subcorpus(_)) => {
                filter.work_in = expand_subcorpus(node, registry);
            }
            _ => {}
        }
    }
    if let (Some(chapter), Some(work)) = (plan.scope.chapter, &plan.scope.work) {
        filter.ref_prefix = Some(format!("{work} {chapter}:"));
    }
    filter
}

fn refusal() -> PlanOutcome {
    PlanOutcome::Refusal {
        message: message(ReasonCode::InsufficientEvidence).to_owned(),
    }
}

fn to_rows(rows: &[SegmentRow]) -> (Vec<ResultRow>, Vec<String>) {
    let mapped = rows
        .iter()
        .map(|r| ResultRow {
            ref_: format_ref(&r.work, &r.ref_),
            text: r.text_plain.clone(),
        })
        .collect();
    let citations = rows.iter().map(|r| r.ref_.clone()).collect();
    (mapped, citations)
}

/// Execute one plan. Consumes the plan logically: the same plan is never
/// executed twice.
///
/// # Errors
///
/// Propagates store and collaborator failures unchanged; no retries.
pub fn execute_plan(
    plan: &QueryPlan,
    query: &str,
    store: &dyn LexicalStore,
    registry: &WorkRegistry,
    opts: &ExecuteOptions<'_>,
) -> TannaResult<PlanOutcome> {
    if let Some(d) = &plan.disambiguation {
        debug!(
            target: TARGET_PREFIX,
            intent = %plan.intent,
            "plan requires disambiguation; not executing"
        );
        return Ok(PlanOutcome::DisambiguationRequired {
            message: d.reason.clone(),
            suggestions: d.suggestions.clone(),
        });
    }

    let scope = build_scope_filter(plan, registry);
    let outcome = match plan.intent {
        QueryIntent::ExactRef => {
            let prefix = plan
                .ref_
                .as_ref()
                .map(|r| r.normalized_ref.clone())
                .or_else(|| plan.scope.work.clone())
                .unwrap_or_else(|| query.to_owned());
            let rows = store.get_by_prefix(&prefix, &scope, plan.limits.max_results)?;
            if rows.is_empty() {
                refusal()
            } else {
                let (mapped, citations) = to_rows(&rows);
                let mut ok = OkAnswer::new(format!("נמצאו {} תוצאות", mapped.len()), plan.clone());
                ok.rows = mapped;
                ok.citations = citations;
                PlanOutcome::Ok(ok)
            }
        }
        QueryIntent::WordOccurrences | QueryIntent::QuoteEntity => {
            let term_norm = normalize_text(plan.term.as_deref().unwrap_or_default()).normalized;
            let rows = store.find_term(&term_norm, &scope, plan.limits.max_results)?;
            let count = store.count_term(&term_norm, &scope)?;
            if rows.is_empty() {
                refusal()
            } else {
                let (mapped, citations) = to_rows(&rows);
                let mut ok = OkAnswer::new(format!("נמצאו {count} מופעים"), plan.clone());
                ok.rows = mapped;
                ok.citations = citations;
                ok.totals = Some(ScanTotals {
                    scanned: usize::try_from(count).unwrap_or(usize::MAX),
                    ..ScanTotals::default()
                });
                PlanOutcome::Ok(ok)
            }
        }
        QueryIntent::ListWorksMentioningEntity => {
            let term_norm = normalize_text(plan.term.as_deref().unwrap_or_default()).normalized;
            // Hard-scoped to the Mishnah: the plan either named it explicitly
            // or was already turned into a disambiguation upstream.
            let scope = ScopeFilter {
                collection: Some(CollectionType::Mishnah),
                ..ScopeFilter::default()
            };
            let works = store.find_term_by_work(&term_norm, &scope, plan.limits.max_results)?;
            if works.is_empty() {
                refusal()
            } else {
                let mut ok = OkAnswer::new("מסכתות שנמצאו:", plan.clone());
                ok.works = works;
                PlanOutcome::Ok(ok)
            }
        }
        QueryIntent::ChapterAbout => {
            let prefix = match (&plan.scope.work, plan.scope.chapter) {
                (Some(work), Some(chapter)) => format!("{work} {chapter}:"),
                _ => String::new(),
            };
            let rows = if prefix.is_empty() {
                Vec::new()
            } else {
                store.get_by_prefix(&prefix, &scope, plan.limits.max_results)?
            };
            if rows.is_empty() {
                refusal()
            } else {
                let (mapped, citations) = to_rows(&rows);
                let chapter = plan.scope.chapter.unwrap_or_default();
                let mut ok = OkAnswer::new(format!("תוצאות לפרק {chapter}"), plan.clone());
                ok.rows = mapped;
                ok.citations = citations;
                PlanOutcome::Ok(ok)
            }
        }
        QueryIntent::CorpusQuoteQuery => execute_quote_scan(plan, store, &scope, opts)?,
        QueryIntent::GeneralQa => match opts.general_answerer {
            Some(answerer) => answerer.answer(query)?,
            None => refusal(),
        },
    };

    info!(
        target: TARGET_PREFIX,
        intent = %plan.intent,
        result_count = match &outcome {
            PlanOutcome::Ok(ok) => ok.rows.len() + ok.works.len() + ok.quote_rows.len(),
            _ => 0,
        },
        "plan executed"
    );
    Ok(outcome)
}

/// Scan every segment of the scoped work through the quote engine.
fn execute_quote_scan(
    plan: &QueryPlan,
    store: &dyn LexicalStore,
    scope: &ScopeFilter,
    opts: &ExecuteOptions<'_>,
) -> TannaResult<PlanOutcome> {
    let Some(work) = &plan.scope.work else {
        // The planner disambiguates unscoped quotation queries; an
        // intent without a work has nothing to scan.
        return Ok(refusal());
    };
    let rows = store.get_by_prefix(&format!("{work} "), scope, plan.limits.max_results)?;
    if rows.is_empty() {
        return Ok(refusal());
    }

    let mut totals = ScanTotals {
        scanned: rows.len(),
        limited: rows.len() == plan.limits.max_results,
        ..ScanTotals::default()
    };
    let mut quote_rows = Vec::new();
    for row in &rows {
        let detections =
            detect_quotes(&row.text_plain, Some(row.collection), store, &opts.link_config)?;
        if detections.is_empty() {
            continue;
        }
        totals.with_candidates += 1;
        for detection in &detections {
            match detection.verdict {
                Verdict::Confirmed => totals.confirmed += 1,
                Verdict::Unconfirmed => totals.unconfirmed += 1,
            }
        }
        quote_rows.push(QuoteScanRow {
            ref_: format_ref(&row.work, &row.ref_),
            text: row.text_plain.clone(),
            detections,
        });
    }

    debug!(
        target: TARGET_PREFIX,
        work = %work,
        candidate_count = totals.confirmed + totals.unconfirmed,
        confirmed_count = totals.confirmed,
        "quote scan finished"
    );
    let mut ok = OkAnswer::new(
        format!(
            "נמצאו {} מקורות עם סימני ציטוט מן התנ\"ך",
            totals.with_candidates
        ),
        plan.clone(),
    );
    ok.quote_rows = quote_rows;
    ok.totals = Some(totals);
    Ok(PlanOutcome::Ok(ok))
}
