//! The live work registry: which canonical works actually exist in storage.
//!
//! A [`WorkRegistry`] is a snapshot, built at most once per process from
//! [`LexicalStore::list_works`] and then shared read-only. It is immutable by
//! construction: a rebuild (after ingestion, or in tests) produces a fresh
//! value rather than mutating the old one, so concurrent readers never
//! observe a half-built registry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::TannaResult;
use crate::store::LexicalStore;
use crate::taxonomy::CollectionType;

/// Immutable snapshot of the works present in storage, per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRegistry {
    works: BTreeMap<CollectionType, BTreeSet<String>>,
}

impl WorkRegistry {
    /// Build a registry by listing the store's works.
    ///
    /// # Errors
    ///
    /// Propagates the store failure; a registry is never partially built.
    pub fn from_store(store: &dyn LexicalStore) -> TannaResult<Self> {
        let mut works: BTreeMap<CollectionType, BTreeSet<String>> = BTreeMap::new();
        for row in store.list_works()? {
            if let Some(collection) = row.collection {
                works.entry(collection).or_default().insert(row.work);
            }
        }
        Ok(Self { works })
    }

    /// Build a registry from literal entries (tests, dry planning).
    #[must_use]
    pub fn from_entries<I, W, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CollectionType, W)>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut works: BTreeMap<CollectionType, BTreeSet<String>> = BTreeMap::new();
        for (collection, names) in entries {
            works
                .entry(collection)
                .or_default()
                .extend(names.into_iter().map(Into::into));
        }
        Self { works }
    }

    /// Whether the exact canonical work exists in the given collection.
    #[must_use]
    pub fn contains(&self, collection: CollectionType, work: &str) -> bool {
        self.works
            .get(&collection)
            .is_some_and(|set| set.contains(work))
    }

    /// The works of one collection, in canonical-name order.
    pub fn works(&self, collection: CollectionType) -> impl Iterator<Item = &str> {
        self.works
            .get(&collection)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// The first collection containing the exact canonical work, in taxonomy
    /// order (tanakh, mishnah, bavli).
    #[must_use]
    pub fn collection_of(&self, work: &str) -> Option<CollectionType> {
        CollectionType::ALL
            .into_iter()
            .find(|&collection| self.contains(collection, work))
    }

    /// Case-insensitive exact match of a token against any registered work,
    /// across all collections. Returns the canonical spelling.
    #[must_use]
    pub fn resolve_ci(&self, token: &str) -> Option<&str> {
        let key = token.trim().to_lowercase();
        self.works
            .values()
            .flat_map(|set| set.iter())
            .find(|work| work.to_lowercase() == key)
            .map(String::as_str)
    }

    /// Total number of registered works across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.works.values().map(BTreeSet::len).sum()
    }

    /// Whether no works are registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.works.values().all(BTreeSet::is_empty)
    }
}
