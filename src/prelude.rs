//! Convenient re-exports for common usage.
//!
//! ```
//! use lww_graph::prelude::*;
//! ```

pub use crate::Crdt;
pub use crate::Direction;
pub use crate::Edge;
pub use crate::LWWElementSet;
pub use crate::LWWGraph;
pub use crate::Timestamp;
pub use crate::Vertex;
