//! Records fetched together
//!
//! Every object the schema hands out remembers the set of records it was
//! fetched with: the rows of one root list, or everything one batched load
//! returned. A relation field resolved on any member of a set is loaded for
//! the whole set at once, so the batch is complete the moment the first
//! sibling asks for it.

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a sibling set, unique for the life of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiblingSetId(u64);

/// Records produced by one fetch
pub struct SiblingSet<T> {
    id: SiblingSetId,
    records: Vec<T>,
}

impl<T> SiblingSet<T> {
    pub fn new(records: Vec<T>) -> Arc<Self> {
        Arc::new(Self {
            id: SiblingSetId(NEXT_SET_ID.fetch_add(1, Ordering::Relaxed)),
            records,
        })
    }

    pub fn id(&self) -> SiblingSetId {
        self.id
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One record of a [`SiblingSet`]; dereferences to the record
pub struct Sibling<T> {
    set: Arc<SiblingSet<T>>,
    index: usize,
}

impl<T> Sibling<T> {
    /// Put `records` into one fresh set and hand out a handle per record
    pub fn all(records: Vec<T>) -> Vec<Self> {
        let set = SiblingSet::new(records);
        Self::members(&set, 0..set.len())
    }

    /// A record fetched on its own
    pub fn single(record: T) -> Self {
        Self {
            set: SiblingSet::new(vec![record]),
            index: 0,
        }
    }

    /// Handles to the records of `set` at `indices`
    pub(crate) fn members(
        set: &Arc<SiblingSet<T>>,
        indices: impl IntoIterator<Item = usize>,
    ) -> Vec<Self> {
        indices
            .into_iter()
            .map(|index| Self {
                set: Arc::clone(set),
                index,
            })
            .collect()
    }

    /// The set this record was fetched in
    pub fn siblings(&self) -> &SiblingSet<T> {
        &self.set
    }
}

impl<T> Clone for Sibling<T> {
    fn clone(&self) -> Self {
        Self {
            set: Arc::clone(&self.set),
            index: self.index,
        }
    }
}

impl<T> Deref for Sibling<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.set.records[self.index]
    }
}

impl<T: fmt::Debug> fmt::Debug for Sibling<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sibling")
            .field("set", &self.set.id)
            .field("record", &**self)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shares_one_set() {
        let siblings = Sibling::all(vec!["a", "b", "c"]);

        assert_eq!(siblings.len(), 3);
        assert_eq!(*siblings[1], "b");
        assert!(siblings
            .iter()
            .all(|s| s.siblings().id() == siblings[0].siblings().id()));
        assert_eq!(siblings[2].siblings().records(), &["a", "b", "c"]);
    }

    #[test]
    fn test_every_fetch_gets_a_new_set() {
        let first = Sibling::single(1);
        let second = Sibling::single(1);

        assert_ne!(first.siblings().id(), second.siblings().id());
        assert_eq!(first.clone().siblings().id(), first.siblings().id());
    }
}
