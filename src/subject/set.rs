//! # Identity-keyed observer set.
//!
//! [`ObserverSet`] stores observer handles keyed by allocation address
//! ([`ObserverId`]), so membership, deduplication and exclusion all use
//! reference identity rather than structural equality.
//!
//! ```text
//! HashMap<ObserverId, ObserverRef<T>>
//!   (addr of Arc data → shared handle)
//! ```
//!
//! ## Rules
//! - Iteration order is unspecified (hash order) and must not be relied upon.
//! - A handle can only be present once; re-inserting is a no-op.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::observers::{ObserverId, ObserverRef};

pub(crate) struct ObserverSet<T> {
    entries: HashMap<ObserverId, ObserverRef<T>>,
}

impl<T> ObserverSet<T> {
    pub(crate) fn with_capacity(capacity: Option<usize>) -> Self {
        let entries = match capacity {
            Some(n) => HashMap::with_capacity(n),
            None => HashMap::new(),
        };
        Self { entries }
    }

    /// Inserts `observer`; returns `false` if it was already present.
    pub(crate) fn insert(&mut self, observer: ObserverRef<T>) -> bool {
        let id = ObserverId::of(&observer);
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, observer);
        true
    }

    pub(crate) fn remove(&mut self, observer: &ObserverRef<T>) -> bool {
        self.entries.remove(&ObserverId::of(observer)).is_some()
    }

    pub(crate) fn contains(&self, observer: &ObserverRef<T>) -> bool {
        self.entries.contains_key(&ObserverId::of(observer))
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ObserverRef<T>> {
        self.entries.values()
    }

    /// Members whose identity is not in `exclude`.
    pub(crate) fn iter_except<'a>(
        &'a self,
        exclude: &'a [ObserverRef<T>],
    ) -> impl Iterator<Item = &'a ObserverRef<T>> + 'a {
        let excluded: HashSet<ObserverId> = exclude.iter().map(ObserverId::of).collect();
        self.entries
            .iter()
            .filter(move |(id, _)| !excluded.contains(*id))
            .map(|(_, obs)| obs)
    }

    /// Cloned handles of the current members, detached from the set.
    pub(crate) fn snapshot(&self) -> Vec<ObserverRef<T>> {
        self.entries.values().map(Arc::clone).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Observer, ReceiveError};

    struct Noop;

    impl Observer<()> for Noop {
        fn receive(&self) -> Result<(), ReceiveError> {
            Ok(())
        }
        fn receive_payload(&self, _: &()) -> Result<(), ReceiveError> {
            Ok(())
        }
    }

    fn noop() -> ObserverRef<()> {
        Arc::new(Noop)
    }

    #[test]
    fn test_insert_deduplicates_by_identity() {
        let mut set = ObserverSet::with_capacity(None);
        let a = noop();
        assert!(set.insert(Arc::clone(&a)));
        assert!(!set.insert(Arc::clone(&a)));
        assert!(set.insert(noop()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_iter_except_skips_excluded() {
        let mut set = ObserverSet::with_capacity(Some(4));
        let (a, b, c) = (noop(), noop(), noop());
        for o in [&a, &b, &c] {
            set.insert(Arc::clone(o));
        }

        let rest: Vec<_> = set.iter_except(std::slice::from_ref(&b)).collect();
        assert_eq!(rest.len(), 2);
        assert!(rest.iter().all(|o| !Arc::ptr_eq(*o, &b)));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut set = ObserverSet::with_capacity(None);
        let a = noop();
        set.insert(Arc::clone(&a));
        let snap = set.snapshot();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(snap.len(), 1);
        assert!(Arc::ptr_eq(&snap[0], &a));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set: ObserverSet<()> = ObserverSet::with_capacity(None);
        assert!(!set.remove(&noop()));
        assert!(!set.contains(&noop()));
    }
}
