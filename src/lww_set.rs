use std::collections::BTreeMap;

use crate::Crdt;

/// Microseconds since the Unix epoch.
///
/// The crate never interprets timestamps beyond comparing them, so any
/// per-replica monotonically non-decreasing source works. Roughly synchronized
/// wall clocks make concurrent edits resolve intuitively but are not required
/// for convergence.
pub type Timestamp = u64;

/// A grow-only set of elements tagged with last-added timestamps
/// (LWW-Element-Set building block).
///
/// Maps each element to the most recent add time observed locally. Elements
/// are never deleted; a recorded timestamp only ever moves forward, across
/// both [`add_at`](LWWElementSet::add_at) and merge. Merging two sets takes
/// the pointwise maximum over the union of their elements, which is
/// commutative, associative, and idempotent because `max` is.
///
/// Elements must be `Ord` because a `BTreeMap` backs the timestamp map;
/// iteration order (and therefore tie-breaking in anything layered on top) is
/// element order.
///
/// # Example
///
/// ```
/// use lww_graph::prelude::*;
///
/// let mut s1 = LWWElementSet::new();
/// s1.add_at("apple", 10);
///
/// let mut s2 = LWWElementSet::new();
/// s2.add_at("apple", 20);
/// s2.add_at("banana", 5);
///
/// s1.merge(&s2);
/// assert_eq!(s1.lookup(&"apple"), Some(20));
/// assert_eq!(s1.lookup(&"banana"), Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LWWElementSet<E: Ord + Clone> {
    timestamps: BTreeMap<E, Timestamp>,
}

impl<E: Ord + Clone> LWWElementSet<E> {
    /// Create a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timestamps: BTreeMap::new(),
        }
    }

    /// The time `item` was last added, or `None` if it was never added.
    #[must_use]
    pub fn lookup(&self, item: &E) -> Option<Timestamp> {
        self.timestamps.get(item).copied()
    }

    /// Add an item with the current wall-clock time.
    ///
    /// This method requires the `std` feature. For deterministic behavior use
    /// [`add_at`](LWWElementSet::add_at) instead.
    #[cfg(feature = "std")]
    pub fn add(&mut self, item: E) {
        self.add_at(item, now());
    }

    /// Add an item with an explicit timestamp.
    ///
    /// If the item already carries an equal or later timestamp the call is a
    /// no-op, so stale or duplicated redeliveries of the same add cannot move
    /// an element's time backwards.
    pub fn add_at(&mut self, item: E, timestamp: Timestamp) {
        match self.timestamps.get(&item) {
            Some(&recorded) if recorded >= timestamp => {}
            _ => {
                self.timestamps.insert(item, timestamp);
            }
        }
    }

    /// The number of elements ever added.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether nothing was ever added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Iterate over `(element, last-added time)` pairs in element order.
    pub fn iter(&self) -> impl Iterator<Item = (&E, Timestamp)> {
        self.timestamps.iter().map(|(e, &ts)| (e, ts))
    }
}

impl<E: Ord + Clone> Default for LWWElementSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Ord + Clone> Crdt for LWWElementSet<E> {
    fn merge(&mut self, other: &Self) {
        for (item, ts) in &other.timestamps {
            match self.timestamps.get(item) {
                Some(&recorded) if recorded >= *ts => {}
                _ => {
                    self.timestamps.insert(item.clone(), *ts);
                }
            }
        }
    }
}

#[cfg(feature = "std")]
pub(crate) fn now() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_is_empty() {
        let s = LWWElementSet::<u32>::new();
        assert!(s.is_empty());
        assert_eq!(s.lookup(&1), None);
    }

    #[test]
    fn add_records_timestamp() {
        let mut s = LWWElementSet::new();
        s.add_at("a", 5);
        assert_eq!(s.lookup(&"a"), Some(5));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn later_add_moves_timestamp_forward() {
        let mut s = LWWElementSet::new();
        s.add_at("a", 5);
        s.add_at("a", 9);
        assert_eq!(s.lookup(&"a"), Some(9));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn stale_add_is_a_no_op() {
        let mut s = LWWElementSet::new();
        s.add_at("a", 9);
        s.add_at("a", 5);
        assert_eq!(s.lookup(&"a"), Some(9));
    }

    #[test]
    fn duplicate_add_at_same_time_is_a_no_op() {
        let mut s = LWWElementSet::new();
        s.add_at("a", 5);
        let before = s.clone();
        s.add_at("a", 5);
        assert_eq!(s, before);
    }

    #[test]
    fn merge_takes_pointwise_max() {
        let mut s1 = LWWElementSet::new();
        s1.add_at("a", 10);
        s1.add_at("b", 3);

        let mut s2 = LWWElementSet::new();
        s2.add_at("a", 7);
        s2.add_at("b", 8);
        s2.add_at("c", 1);

        s1.merge(&s2);
        assert_eq!(s1.lookup(&"a"), Some(10));
        assert_eq!(s1.lookup(&"b"), Some(8));
        assert_eq!(s1.lookup(&"c"), Some(1));
    }

    #[test]
    fn merge_is_commutative() {
        let mut s1 = LWWElementSet::new();
        s1.add_at(1, 4);
        s1.add_at(2, 2);

        let mut s2 = LWWElementSet::new();
        s2.add_at(2, 6);
        s2.add_at(3, 1);

        let mut left = s1.clone();
        left.merge(&s2);

        let mut right = s2.clone();
        right.merge(&s1);

        assert_eq!(left, right);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut s1 = LWWElementSet::new();
        s1.add_at(1, 4);

        let mut s2 = LWWElementSet::new();
        s2.add_at(2, 6);

        s1.merge(&s2);
        let after_first = s1.clone();
        s1.merge(&s2);
        assert_eq!(s1, after_first);

        let mut with_self = s1.clone();
        with_self.merge(&s1.clone());
        assert_eq!(with_self, s1);
    }

    #[test]
    fn merged_does_not_mutate_inputs() {
        let mut s1 = LWWElementSet::new();
        s1.add_at(1, 4);
        let mut s2 = LWWElementSet::new();
        s2.add_at(2, 6);

        let s1_before = s1.clone();
        let s2_before = s2.clone();
        let out = s1.merged(&s2);

        assert_eq!(s1, s1_before);
        assert_eq!(s2, s2_before);
        assert_eq!(out.lookup(&1), Some(4));
        assert_eq!(out.lookup(&2), Some(6));
    }

    #[test]
    fn iter_yields_element_order() {
        let mut s = LWWElementSet::new();
        s.add_at(3, 1);
        s.add_at(1, 2);
        s.add_at(2, 3);

        let items: Vec<_> = s.iter().map(|(e, _)| *e).collect();
        assert_eq!(items, vec![1, 2, 3]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_and_merges() {
        let mut remote = LWWElementSet::new();
        remote.add_at("a".to_string(), 10);
        remote.add_at("b".to_string(), 20);

        // Ship a full-state snapshot as the host would.
        let wire = serde_json::to_string(&remote).unwrap();
        let snapshot: LWWElementSet<String> = serde_json::from_str(&wire).unwrap();
        assert_eq!(snapshot, remote);

        let mut local = LWWElementSet::new();
        local.add_at("a".to_string(), 15);
        local.merge(&snapshot);
        assert_eq!(local.lookup(&"a".to_string()), Some(15));
        assert_eq!(local.lookup(&"b".to_string()), Some(20));
    }
}
