//! Request-scoped loader registry
//!
//! A batch is identified by the relation loader, the field node being
//! resolved and the sibling set of the parent objects. The first parent to
//! resolve the field fetches the relation for every key of its sibling set;
//! every other parent waits on that same batch. The batch boundary is the
//! sibling set itself, so the number of repository calls depends only on
//! the query and the data, never on how the executor interleaves resolvers.
//!
//! Structurally identical selections at different positions in the
//! document resolve on different sibling sets (or different field nodes)
//! and never share a batch.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use dashmap::DashMap;
use tokio::sync::OnceCell;

use super::siblings::{Sibling, SiblingSet, SiblingSetId};
use crate::error::{ApiError, ApiResult};
use crate::graphql::context::NodeId;
use crate::repositories::{EntityRepository, RepositoryError};

/// Batching parameters applied to every loader a registry runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Split a batch into repository calls of at most this many keys;
    /// `None` sends all keys of a batch in one call
    pub max_batch_size: Option<usize>,
}

/// A batch function the registry knows how to build and run
pub trait RelationLoader<K>: Loader<K, Error = Arc<RepositoryError>>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
{
    /// Name used in logs
    const NAME: &'static str;

    /// Record a loaded value is made of
    type Record: Send + Sync + 'static;

    fn new(repository: Arc<dyn EntityRepository>) -> Self;

    /// Split one loaded value into its records
    fn records(value: Self::Value) -> Vec<Self::Record>;
}

/// Outcome of one batched load
pub type BatchResult<K, T> = Result<Batch<K, T>, Arc<RepositoryError>>;

/// Filled exactly once by the first parent to resolve the field
pub type BatchCell<K, T> = OnceCell<BatchResult<K, T>>;

/// Records of one batched load, indexed by the key that asked for them.
///
/// All records form a single sibling set, which becomes the parent set for
/// the next level of the query.
pub struct Batch<K, T> {
    set: Arc<SiblingSet<T>>,
    by_key: HashMap<K, Vec<usize>>,
}

impl<K: Hash + Eq, T> Batch<K, T> {
    fn new(values: HashMap<K, Vec<T>>) -> Self {
        let mut records = Vec::new();
        let mut by_key = HashMap::with_capacity(values.len());

        for (key, group) in values {
            let start = records.len();
            records.extend(group);
            by_key.insert(key, (start..records.len()).collect());
        }

        Self {
            set: SiblingSet::new(records),
            by_key,
        }
    }

    /// Records loaded for `key`; empty when the batch returned none
    pub fn get(&self, key: &K) -> Vec<Sibling<T>> {
        match self.by_key.get(key) {
            Some(indices) => Sibling::members(&self.set, indices.iter().copied()),
            None => Vec::new(),
        }
    }

    /// Number of records across all keys
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Where a batch lives: the field node and the parents' sibling set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchKey {
    node: NodeId,
    siblings: SiblingSetId,
}

impl BatchKey {
    pub fn new(node: NodeId, siblings: SiblingSetId) -> Self {
        Self { node, siblings }
    }
}

/// Map from (loader type, batch key) to the batch serving it
pub struct LoaderRegistry {
    repository: Arc<dyn EntityRepository>,
    settings: LoaderSettings,
    batches: DashMap<(TypeId, BatchKey), Arc<dyn Any + Send + Sync>>,
}

impl LoaderRegistry {
    pub fn new(repository: Arc<dyn EntityRepository>, settings: LoaderSettings) -> Self {
        Self {
            repository,
            settings,
            batches: DashMap::new(),
        }
    }

    /// Look up the batch for `key`, creating an empty one on first use
    pub fn get_or_create<K, L>(&self, key: BatchKey) -> ApiResult<Arc<BatchCell<K, L::Record>>>
    where
        K: Send + Sync + Hash + Eq + Clone + 'static,
        L: RelationLoader<K>,
    {
        let entry = self
            .batches
            .entry((TypeId::of::<(K, L)>(), key))
            .or_insert_with(|| {
                tracing::trace!(loader = L::NAME, key = ?key, "Creating batch");
                Arc::new(BatchCell::<K, L::Record>::new()) as Arc<dyn Any + Send + Sync>
            })
            .value()
            .clone();

        entry.downcast::<BatchCell<K, L::Record>>().map_err(|_| {
            ApiError::Internal(format!("loader registry holds a foreign type for {}", L::NAME))
        })
    }

    /// Run `L` once over `keys`, deduplicated.
    ///
    /// With `max_batch_size` set the keys are sent in consecutive chunks;
    /// the first failing chunk fails the whole batch.
    pub async fn fetch<K, L>(&self, keys: Vec<K>) -> BatchResult<K, L::Record>
    where
        K: Send + Sync + Hash + Eq + Clone + 'static,
        L: RelationLoader<K>,
    {
        let mut seen = HashSet::with_capacity(keys.len());
        let keys: Vec<K> = keys.into_iter().filter(|k| seen.insert(k.clone())).collect();

        let loader = L::new(Arc::clone(&self.repository));
        let chunk_size = self.settings.max_batch_size.unwrap_or(keys.len()).max(1);
        let mut values = HashMap::with_capacity(keys.len());

        for chunk in keys.chunks(chunk_size) {
            tracing::debug!(loader = L::NAME, keys = chunk.len(), "Dispatching batch");
            let loaded = loader.load(chunk).await.map_err(|err| {
                tracing::warn!(loader = L::NAME, error = %err, "Batch failed");
                err
            })?;
            values.extend(loaded.into_iter().map(|(k, v)| (k, L::records(v))));
        }

        Ok(Batch::new(values))
    }

    /// Number of batches created so far
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
