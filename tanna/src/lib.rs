//! # tanna
//!
//! Natural-language Hebrew question answering over a closed corpus of three
//! canonical collections: Scripture (Tanakh), Mishnah, and Babylonian Talmud
//! (Bavli).
//!
//! A query flows through four stages:
//!
//! ```text
//!  Query ─► normalize ─► Intent Planner ─► QueryPlan ─► Executor ─► PlanOutcome ─► renderers
//!                        (rule cascade,                 (store reads,
//!                         scope resolver)                quote engine)
//! ```
//!
//! Planning is pure pattern recognition — no learned model. Unrecognized
//! queries fall through to an external general-QA collaborator; ambiguous
//! scopes come back as terminal disambiguation requests with concrete
//! reformulations; well-scoped queries with no evidence are refused, never
//! answered emptily.
//!
//! # Quick Start
//!
//! ```rust
//! use tanna::prelude::*;
//!
//! // Seed the reference in-memory store (a real deployment wires the
//! // embedded full-text store behind the same trait).
//! let mut store = MemoryStore::new();
//! store.insert(
//!     CollectionType::Tanakh,
//!     "Genesis",
//!     "Genesis 1:1",
//!     "בְּרֵאשִׁית בָּרָא אֱלֹהִים אֵת הַשָּׁמַיִם וְאֵת הָאָרֶץ",
//! );
//!
//! // The registry snapshots which works exist; build it once per process.
//! let registry = WorkRegistry::from_store(&store).expect("list works");
//!
//! let plan = plan_query("בראשית 1:1", &registry);
//! let outcome =
//!     execute_plan(&plan, "בראשית 1:1", &store, &registry, &ExecuteOptions::default())
//!         .expect("execute");
//! println!("{}", render_outcome(&outcome));
//! ```
//!
//! ## Crate Layout
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | `tanna-core` | Shared types, Hebrew normalizer, taxonomy, work registry, store trait, errors |
//! | `tanna-planner` | Scope resolver, intent rule cascade, message catalog, renderers |
//! | `tanna-quotes` | Quote candidate extraction, Scripture linking, scan reports |
//! | `tanna` | Plan executor, general-QA seam, in-memory reference store |
//!
//! ## Key Types
//!
//! - [`plan_query`] — turn a Hebrew query into a typed [`QueryPlan`]
//! - [`execute_plan`] — run a plan against a [`LexicalStore`]
//! - [`WorkRegistry`] — immutable snapshot of ingested works
//! - [`PlanOutcome`] — disambiguation / refusal / answer
//! - [`detect_quotes`] — quote detection and Scripture linking for one segment
//! - [`MemoryStore`] — dependency-free reference store backend

pub mod executor;
pub mod memory_store;

pub use executor::{ExecuteOptions, GeneralAnswerer, execute_plan};
pub use memory_store::MemoryStore;

pub use tanna_core::error::{TannaError, TannaResult};
pub use tanna_core::normalize::{normalize_query_input, normalize_text};
pub use tanna_core::registry::WorkRegistry;
pub use tanna_core::store::{LexicalStore, ScopeFilter, SegmentRow, WorkCount};
pub use tanna_core::taxonomy::CollectionType;
pub use tanna_planner::render::{render_outcome, render_word_occurrences};
pub use tanna_planner::rules::{plan_query, plan_query_with};
pub use tanna_planner::types::{IntentLimits, PlanOutcome, QueryIntent, QueryPlan};
pub use tanna_quotes::{LinkConfig, detect_quotes, render_quote_report};

/// Install a global `tracing` subscriber with an env-filter.
///
/// Honors `RUST_LOG` when set, defaulting to `tanna=info`. Safe to call more
/// than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tanna=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Commonly used imports for consumers.
pub mod prelude {
    pub use crate::executor::{ExecuteOptions, GeneralAnswerer, execute_plan};
    pub use crate::memory_store::MemoryStore;
    pub use tanna_core::error::{TannaError, TannaResult};
    pub use tanna_core::registry::WorkRegistry;
    pub use tanna_core::store::{LexicalStore, ScopeFilter};
    pub use tanna_core::taxonomy::CollectionType;
    pub use tanna_planner::render::{render_outcome, render_word_occurrences};
    pub use tanna_planner::rules::plan_query;
    pub use tanna_planner::types::{PlanOutcome, QueryIntent, QueryPlan};
    pub use tanna_quotes::{LinkConfig, ReportOptions, render_quote_report};
}
