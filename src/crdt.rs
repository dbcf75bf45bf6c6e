/// Core trait for state-based (convergent) CRDTs.
///
/// A CRDT (Conflict-free Replicated Data Type) guarantees that concurrent
/// updates on different replicas will converge to the same state after
/// merging, without requiring coordination.
///
/// # Properties
///
/// All implementations must satisfy:
/// - **Commutativity:** `a.merge(b) == b.merge(a)`
/// - **Associativity:** `a.merge(b.merge(c)) == a.merge(b).merge(c)`
/// - **Idempotency:** `a.merge(a) == a`
///
/// These hold for any pair of replicas, including a replica merged with
/// itself or with an older snapshot of itself.
pub trait Crdt {
    /// Merge another replica's state into this one.
    ///
    /// After merging, `self` contains the least upper bound of both states.
    fn merge(&mut self, other: &Self);

    /// Pure form of [`merge`](Crdt::merge): returns the merged state without
    /// mutating either input.
    ///
    /// Useful when replicas are passed around as values and callers must not
    /// observe aliasing effects.
    #[must_use]
    fn merged(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.merge(other);
        out
    }
}
