use std::collections::BTreeSet;

use crate::{Crdt, Edge, LWWElementSet, Timestamp, Vertex};

/// Direction policy for edge mutators.
///
/// An undirected edge is modeled as two directed edges, one per direction,
/// inserted (or tombstoned) together with the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Directed,
    Undirected,
}

/// A state-based last-writer-wins element graph (LWW-Element-Graph).
///
/// Composes four [`LWWElementSet`]s — vertices added, vertices removed, edges
/// added, edges removed — and layers graph semantics on top. Nothing is ever
/// deleted: removal records a tombstone timestamp next to the add timestamp,
/// and queries collapse the two into a boolean with **add-bias**: an element
/// exists iff it was added and its add time is greater than *or equal to* its
/// remove time. A later add after a removal revives the element.
///
/// An edge additionally requires both endpoints to currently exist, so
/// removing a vertex hides every incident edge without touching the edges'
/// own tombstone state.
///
/// Guarded mutators report rejection by returning `false`; they never error,
/// because replayed and merged operations must never fail.
///
/// # Example
///
/// ```
/// use lww_graph::prelude::*;
///
/// let mut g = LWWGraph::new();
/// let a = Vertex::new(1);
/// let b = Vertex::new(2);
/// g.add_vertex_at(a.clone(), 10);
/// g.add_vertex_at(b.clone(), 10);
/// assert!(g.add_edge_at(a.clone(), b.clone(), Direction::Directed, 11));
///
/// // Removing a vertex with a live edge is rejected.
/// assert!(!g.remove_vertex_at(&a, 12));
///
/// assert!(g.remove_edge_at(&a, &b, Direction::Directed, 12));
/// assert!(g.remove_vertex_at(&a, 13));
/// assert_eq!(g.vertices(), vec![b]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LWWGraph<T: Ord + Clone> {
    added_vertices: LWWElementSet<Vertex<T>>,
    removed_vertices: LWWElementSet<Vertex<T>>,
    added_edges: LWWElementSet<Edge<T>>,
    removed_edges: LWWElementSet<Edge<T>>,
}

impl<T: Ord + Clone> LWWGraph<T> {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            added_vertices: LWWElementSet::new(),
            removed_vertices: LWWElementSet::new(),
            added_edges: LWWElementSet::new(),
            removed_edges: LWWElementSet::new(),
        }
    }

    // --- queries ---

    /// Whether `vertex` currently exists in the graph.
    ///
    /// True iff the vertex was added and not removed later. On an exact
    /// add/remove timestamp tie the add wins.
    #[must_use]
    pub fn contains_vertex(&self, vertex: &Vertex<T>) -> bool {
        match (
            self.added_vertices.lookup(vertex),
            self.removed_vertices.lookup(vertex),
        ) {
            (Some(added), Some(removed)) => added >= removed,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Whether `edge` currently exists in the graph.
    ///
    /// Requires the edge's own add/remove times to favor the add (same
    /// add-bias as vertices) *and* both endpoints to currently exist. An edge
    /// whose endpoint was removed is hidden even though its own tombstone
    /// state is untouched.
    #[must_use]
    pub fn contains_edge(&self, edge: &Edge<T>) -> bool {
        if !self.contains_vertex(edge.source()) || !self.contains_vertex(edge.destination()) {
            return false;
        }
        match (
            self.added_edges.lookup(edge),
            self.removed_edges.lookup(edge),
        ) {
            (Some(added), Some(removed)) => added >= removed,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// All currently-existing vertices, ordered by ascending add time.
    ///
    /// Vertices added at the same time appear in element order (the sort is
    /// stable over the ordered backing map).
    #[must_use]
    pub fn vertices(&self) -> Vec<Vertex<T>> {
        let mut live: Vec<(&Vertex<T>, Timestamp)> = self
            .added_vertices
            .iter()
            .filter(|(v, _)| self.contains_vertex(v))
            .collect();
        live.sort_by_key(|&(_, ts)| ts);
        live.into_iter().map(|(v, _)| v.clone()).collect()
    }

    /// All currently-existing edges, ordered by ascending add time.
    ///
    /// Restricted to edges whose endpoints currently exist; ties appear in
    /// element order.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<T>> {
        let mut live: Vec<(&Edge<T>, Timestamp)> = self
            .added_edges
            .iter()
            .filter(|(e, _)| self.contains_edge(e))
            .collect();
        live.sort_by_key(|&(_, ts)| ts);
        live.into_iter().map(|(e, _)| e.clone()).collect()
    }

    /// The other endpoint of every currently-existing edge incident to
    /// `vertex`, as source or destination.
    #[must_use]
    pub fn neighbors(&self, vertex: &Vertex<T>) -> BTreeSet<Vertex<T>> {
        let mut connected = BTreeSet::new();
        for (edge, _) in self.added_edges.iter() {
            if !self.contains_edge(edge) {
                continue;
            }
            if edge.source() == vertex {
                connected.insert(edge.destination().clone());
            }
            if edge.destination() == vertex {
                connected.insert(edge.source().clone());
            }
        }
        connected
    }

    /// Every currently-existing edge incident to `vertex`, in either
    /// direction.
    #[must_use]
    pub fn incident_edges(&self, vertex: &Vertex<T>) -> BTreeSet<Edge<T>> {
        self.added_edges
            .iter()
            .filter(|(e, _)| e.is_incident_to(vertex) && self.contains_edge(e))
            .map(|(e, _)| e.clone())
            .collect()
    }

    /// The first currently-existing edge connecting `v1` and `v2`, checking
    /// both directions.
    ///
    /// "First" is element order of the added-edges map, so the result is
    /// deterministic for a given state.
    #[must_use]
    pub fn find_edge(&self, v1: &Vertex<T>, v2: &Vertex<T>) -> Option<Edge<T>> {
        self.added_edges
            .iter()
            .map(|(e, _)| e)
            .find(|e| e.connects(v1, v2) && self.contains_edge(e))
            .cloned()
    }

    // --- mutators ---

    /// Add a vertex with the current wall-clock time. Requires the `std`
    /// feature; see [`add_vertex_at`](LWWGraph::add_vertex_at).
    #[cfg(feature = "std")]
    pub fn add_vertex(&mut self, vertex: Vertex<T>) {
        self.add_vertex_at(vertex, crate::lww_set::now());
    }

    /// Add a vertex with an explicit timestamp.
    ///
    /// No precondition: re-adding an existing or previously removed vertex
    /// simply moves its add time forward (a later add revives a removed
    /// vertex).
    pub fn add_vertex_at(&mut self, vertex: Vertex<T>, timestamp: Timestamp) {
        self.added_vertices.add_at(vertex, timestamp);
    }

    /// Add an edge with the current wall-clock time. Requires the `std`
    /// feature; see [`add_edge_at`](LWWGraph::add_edge_at).
    #[cfg(feature = "std")]
    pub fn add_edge(
        &mut self,
        source: Vertex<T>,
        destination: Vertex<T>,
        direction: Direction,
    ) -> bool {
        self.add_edge_at(source, destination, direction, crate::lww_set::now())
    }

    /// Add an edge with an explicit timestamp.
    ///
    /// Both `source` and `destination` must currently exist; otherwise the
    /// call is rejected as a no-op and returns `false`. For
    /// [`Direction::Undirected`] the reverse edge is inserted as well, with
    /// the same timestamp.
    pub fn add_edge_at(
        &mut self,
        source: Vertex<T>,
        destination: Vertex<T>,
        direction: Direction,
        timestamp: Timestamp,
    ) -> bool {
        if !self.contains_vertex(&source) || !self.contains_vertex(&destination) {
            return false;
        }
        let edge = Edge::new(source, destination);
        if direction == Direction::Undirected {
            self.added_edges.add_at(edge.reversed(), timestamp);
        }
        self.added_edges.add_at(edge, timestamp);
        true
    }

    /// Remove a vertex with the current wall-clock time. Requires the `std`
    /// feature; see [`remove_vertex_at`](LWWGraph::remove_vertex_at).
    #[cfg(feature = "std")]
    pub fn remove_vertex(&mut self, vertex: &Vertex<T>) -> bool {
        self.remove_vertex_at(vertex, crate::lww_set::now())
    }

    /// Remove a vertex with an explicit timestamp.
    ///
    /// Rejected as a no-op (returning `false`) unless the vertex currently
    /// exists and no currently-existing edge touches it in either direction.
    /// Removing a vertex out from under a live edge would leave the edge's
    /// add record pointing at a missing endpoint, a state that resurrects
    /// unpredictably on merge.
    pub fn remove_vertex_at(&mut self, vertex: &Vertex<T>, timestamp: Timestamp) -> bool {
        if !self.contains_vertex(vertex) {
            return false;
        }
        let has_live_edge = self
            .added_edges
            .iter()
            .any(|(e, _)| e.is_incident_to(vertex) && self.contains_edge(e));
        if has_live_edge {
            return false;
        }
        self.removed_vertices.add_at(vertex.clone(), timestamp);
        true
    }

    /// Remove an edge with the current wall-clock time. Requires the `std`
    /// feature; see [`remove_edge_at`](LWWGraph::remove_edge_at).
    #[cfg(feature = "std")]
    pub fn remove_edge(
        &mut self,
        v1: &Vertex<T>,
        v2: &Vertex<T>,
        direction: Direction,
    ) -> bool {
        self.remove_edge_at(v1, v2, direction, crate::lww_set::now())
    }

    /// Remove an edge with an explicit timestamp.
    ///
    /// Tombstones the directed edge `(v1, v2)` if it currently exists. For
    /// [`Direction::Undirected`] the reverse edge `(v2, v1)` is attempted as
    /// well; each direction is removed independently and only if it currently
    /// exists. Returns `true` if at least one direction was tombstoned.
    pub fn remove_edge_at(
        &mut self,
        v1: &Vertex<T>,
        v2: &Vertex<T>,
        direction: Direction,
        timestamp: Timestamp,
    ) -> bool {
        let mut removed = self.tombstone_edge(Edge::new(v1.clone(), v2.clone()), timestamp);
        if direction == Direction::Undirected {
            removed |= self.tombstone_edge(Edge::new(v2.clone(), v1.clone()), timestamp);
        }
        removed
    }

    fn tombstone_edge(&mut self, edge: Edge<T>, timestamp: Timestamp) -> bool {
        if !self.contains_edge(&edge) {
            return false;
        }
        self.removed_edges.add_at(edge, timestamp);
        true
    }

    // --- snapshot views ---

    /// Vertices ever added, with add times.
    #[must_use]
    pub fn added_vertices(&self) -> &LWWElementSet<Vertex<T>> {
        &self.added_vertices
    }

    /// Vertices ever removed, with remove times.
    #[must_use]
    pub fn removed_vertices(&self) -> &LWWElementSet<Vertex<T>> {
        &self.removed_vertices
    }

    /// Edges ever added, with add times.
    #[must_use]
    pub fn added_edges(&self) -> &LWWElementSet<Edge<T>> {
        &self.added_edges
    }

    /// Edges ever removed, with remove times.
    #[must_use]
    pub fn removed_edges(&self) -> &LWWElementSet<Edge<T>> {
        &self.removed_edges
    }
}

impl<T: Ord + Clone> Default for LWWGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Crdt for LWWGraph<T> {
    /// Merge another replica's snapshot: the four element sets merge
    /// pairwise. Graph-level preconditions do not apply here — every remote
    /// record was admitted by its own replica's guards, and merge must never
    /// reject.
    fn merge(&mut self, other: &Self) {
        self.added_vertices.merge(&other.added_vertices);
        self.removed_vertices.merge(&other.removed_vertices);
        self.added_edges.merge(&other.added_edges);
        self.removed_edges.merge(&other.removed_edges);
    }
}
