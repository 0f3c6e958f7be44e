//! Query-intent planning for the tanna corpus question-answering library.
//!
//! This crate turns free-form Hebrew questions into typed, scoped
//! [`QueryPlan`]s without any learned model:
//!
//! - [`scope`] resolves raw tokens to corpus locations via a fixed cascade
//!   over the taxonomy and the live work registry, and expands divisions and
//!   sedarim to their ingested member works;
//! - [`rules`] recognizes intent with an ordered list of pattern rules
//!   (first match wins) and attaches scope, limits, and any terminal
//!   disambiguation requirement;
//! - [`messages`] is the fixed catalog of user-facing Hebrew strings;
//! - [`render`] pretty-prints outcomes, with gematria numerals and Hebrew
//!   work names.
//!
//! Planning is synchronous and pure: the only shared state a plan reads is
//! the immutable [`WorkRegistry`](tanna_core::registry::WorkRegistry).

pub mod messages;
pub mod render;
pub mod rules;
pub mod scope;
pub mod types;

pub use messages::{ReasonCode, message};
pub use render::{
    OccurrenceRenderOptions, format_hebrew_ref, format_ref, number_to_hebrew, render_outcome,
    render_word_occurrences,
};
pub use rules::{PlanContext, PlanRule, RULES, plan_query, plan_query_with};
pub use scope::{ScopeResolution, expand_subcorpus, resolve_scope_node};
pub use types::{
    Disambiguation, ExecutionStrategy, IntentLimits, OkAnswer, ParsedRef, PlanDebug, PlanLimits,
    PlanOutcome, QueryIntent, QueryPlan, ResultRow, ScopeConstraint, ScopeNode,
};
