/// A graph vertex: an immutable wrapper around one payload value.
///
/// Two vertices are equal iff their payloads are equal; ordering and hashing
/// delegate to the payload as well. The payload cannot be changed after
/// construction — to "rename" a vertex, add a new one and remove the old.
///
/// # Example
///
/// ```
/// use lww_graph::Vertex;
///
/// let a = Vertex::new("user-1");
/// let b = Vertex::from("user-1");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vertex<T: Ord + Clone> {
    data: T,
}

impl<T: Ord + Clone> Vertex<T> {
    /// Create a vertex wrapping `data`.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Borrow the payload.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume the vertex and return the payload.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T: Ord + Clone> From<T> for Vertex<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_payload_equality() {
        assert_eq!(Vertex::new(1), Vertex::new(1));
        assert_ne!(Vertex::new(1), Vertex::new(2));
    }

    #[test]
    fn ordering_follows_payload() {
        assert!(Vertex::new(1) < Vertex::new(2));
    }

    #[test]
    fn into_inner_returns_payload() {
        assert_eq!(Vertex::new("x").into_inner(), "x");
    }
}
