//! Scope-token resolution against the taxonomy and the live registry.
//!
//! [`resolve_scope_node`] turns one raw Hebrew token into a corpus location,
//! by a fixed first-match cascade:
//!
//! 1. the Scripture corpus keyword (תנ"ך / תנך);
//! 2. a Scriptural division name, or a seder name after the literal word סדר;
//! 3. a case-insensitive exact match against any work in the live registry;
//! 4. a fallback match against the static Hebrew→canonical tables (covers
//!    works not yet ingested);
//! 5. if all fail and the token starts with the inseparable preposition ב,
//!    strip that one character and retry the cascade once.
//!
//! The single strip-and-retry, rather than a general affix stripper, avoids
//! false positives on work names that genuinely start with ב.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tanna_core::registry::WorkRegistry;
use tanna_core::taxonomy::{
    self, CollectionType, DIVISIONS, TANAKH_KEYWORDS, division_books, seder_tractates,
};
use tanna_core::tracing_config::TARGET_PREFIX;

use crate::types::ScopeNode;

/// Outcome of resolving one scope token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeResolution {
    /// The resolved corpus location, when any step matched.
    pub node: Option<ScopeNode>,
    /// The canonical work name, when the token named a single work.
    pub work: Option<String>,
}

impl ScopeResolution {
    fn empty() -> Self {
        Self::default()
    }

    /// Whether any step of the cascade matched.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.node.is_some() || self.work.is_some()
    }
}

fn try_resolve(candidate: &str, registry: &WorkRegistry) -> ScopeResolution {
    if TANAKH_KEYWORDS.contains(&candidate) {
        return ScopeResolution {
            node: Some(ScopeNode::Corpus(CollectionType::Tanakh)),
            work: None,
        };
    }
    if DIVISIONS.contains(&candidate) {
        return ScopeResolution {
            node: Some(ScopeNode::Subcorpus(candidate.to_owned())),
            work: None,
        };
    }
    if let Some(seder) = candidate.strip_prefix("סדר ") {
        if seder_tractates(seder).is_some() {
            return ScopeResolution {
                node: Some(ScopeNode::Subcorpus(seder.to_owned())),
                work: None,
            };
        }
    }
    let from_registry = registry.resolve_ci(candidate).map(str::to_owned);
    let work = from_registry.or_else(|| taxonomy::static_canonical(candidate).map(str::to_owned));
    if let Some(work) = work {
        return ScopeResolution {
            node: Some(ScopeNode::Work(work.clone())),
            work: Some(work),
        };
    }
    ScopeResolution::empty()
}

/// Resolve one raw token into a corpus location, first match wins.
#[must_use]
pub fn resolve_scope_node(raw: &str, registry: &WorkRegistry) -> ScopeResolution {
    let value = raw.trim();
    let primary = try_resolve(value, registry);
    if primary.is_resolved() {
        return primary;
    }

    // Inseparable prepositions attach without a space; one strip-and-retry
    // handles "בברכות" → "ברכות".
    if let Some(stripped) = value.strip_prefix('ב') {
        if !stripped.is_empty() {
            let secondary = try_resolve(stripped, registry);
            if secondary.is_resolved() {
                debug!(
                    target: TARGET_PREFIX,
                    token = value,
                    "scope resolved after preposition strip"
                );
                return secondary;
            }
        }
    }

    ScopeResolution::empty()
}

/// The canonical works of a division or seder that actually exist in storage.
///
/// Intersects the static membership list with the live registry, preserving
/// the static order and silently dropping works not yet ingested. Returns
/// `None` for corpus and work nodes.
#[must_use]
pub fn expand_subcorpus(node: &ScopeNode, registry: &WorkRegistry) -> Option<Vec<String>> {
    let ScopeNode::Subcorpus(name) = node else {
        return None;
    };
    if let Some(books) = division_books(name) {
        return Some(intersect(books, registry, CollectionType::Tanakh));
    }
    if let Some(tractates) = seder_tractates(name) {
        return Some(intersect(tractates, registry, CollectionType::Mishnah));
    }
    None
}

fn intersect(
    base: &[&str],
    registry: &WorkRegistry,
    collection: CollectionType,
) -> Vec<String> {
    base.iter()
        .filter(|work| registry.contains(collection, work))
        .map(|work| (*work).to_owned())
        .collect()
}
