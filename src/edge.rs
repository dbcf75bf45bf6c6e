use crate::Vertex;

/// A directed edge: an ordered pair of vertices.
///
/// Identity is the ordered pair — `Edge::new(a, b)` and `Edge::new(b, a)` are
/// distinct elements. "Undirected" is a policy applied by the graph's edge
/// mutators (which insert both directions), not a property of the edge itself.
///
/// # Example
///
/// ```
/// use lww_graph::{Edge, Vertex};
///
/// let ab = Edge::new(Vertex::new('a'), Vertex::new('b'));
/// let ba = ab.reversed();
/// assert_ne!(ab, ba);
/// assert_eq!(ab.source(), ba.destination());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge<T: Ord + Clone> {
    source: Vertex<T>,
    destination: Vertex<T>,
}

impl<T: Ord + Clone> Edge<T> {
    /// Create a directed edge from `source` to `destination`.
    #[must_use]
    pub fn new(source: Vertex<T>, destination: Vertex<T>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// The vertex this edge starts at.
    #[must_use]
    pub fn source(&self) -> &Vertex<T> {
        &self.source
    }

    /// The vertex this edge points to.
    #[must_use]
    pub fn destination(&self) -> &Vertex<T> {
        &self.destination
    }

    /// The same pair with source and destination swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            source: self.destination.clone(),
            destination: self.source.clone(),
        }
    }

    /// Whether `vertex` is this edge's source or destination.
    #[must_use]
    pub fn is_incident_to(&self, vertex: &Vertex<T>) -> bool {
        self.source == *vertex || self.destination == *vertex
    }

    /// Whether this edge connects `v1` and `v2` in either direction.
    #[must_use]
    pub fn connects(&self, v1: &Vertex<T>, v2: &Vertex<T>) -> bool {
        (self.source == *v1 && self.destination == *v2)
            || (self.source == *v2 && self.destination == *v1)
    }
}
