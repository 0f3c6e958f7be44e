//! Tracing conventions shared across the tanna crates.
//!
//! Span and field names are centralized here so consumers can match on them
//! in subscribers, dashboards, and tests. Subscriber installation itself is
//! left to the facade (or to the consumer's own setup).

use tracing::Level;

/// Target prefix used by all tanna tracing spans and events.
///
/// Consumers can use this to filter tanna logs:
/// ```text
/// RUST_LOG=tanna=debug
/// ```
pub const TARGET_PREFIX: &str = "tanna";

/// Standard tracing span names used across the pipeline.
pub mod span_names {
    /// Root span for planning one query.
    pub const PLAN: &str = "tanna::plan";
    /// Scope-token resolution.
    pub const RESOLVE_SCOPE: &str = "tanna::resolve_scope";
    /// Plan execution against the store.
    pub const EXECUTE: &str = "tanna::execute";
    /// Quote-candidate extraction over one segment.
    pub const QUOTE_EXTRACT: &str = "tanna::quote_extract";
    /// Quote-to-Scripture linking for one candidate.
    pub const QUOTE_LINK: &str = "tanna::quote_link";
    /// Corpus-wide quotation scan.
    pub const QUOTE_SCAN: &str = "tanna::quote_scan";
    /// Work-registry construction.
    pub const REGISTRY_BUILD: &str = "tanna::registry_build";
}

/// Standard structured field names used in tracing events.
pub mod field_names {
    pub const QUERY_LEN: &str = "query_len";
    pub const MATCHED_RULE: &str = "matched_rule";
    pub const INTENT: &str = "intent";
    pub const WORK: &str = "work";
    pub const RESULT_COUNT: &str = "result_count";
    pub const CANDIDATE_COUNT: &str = "candidate_count";
    pub const CONFIRMED_COUNT: &str = "confirmed_count";
    pub const SHARED_TOKENS: &str = "shared_tokens";
    pub const SCORE: &str = "score";
}

/// Parse a log level string (case-insensitive).
///
/// Recognized values: `trace`, `debug`, `info`, `warn`, `error`.
/// Returns `None` for unrecognized strings.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Returns the recommended `tracing::Level` for the given environment.
///
/// Checks `TANNA_LOG_LEVEL` first, then falls back to the provided default.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var("TANNA_LOG_LEVEL")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}
