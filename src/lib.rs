//! # lww-graph
//!
//! A state-based last-writer-wins element-graph CRDT.
//!
//! A CRDT (Conflict-free Replicated Data Type) is a data structure that can be
//! replicated across multiple devices and updated independently. When replicas
//! are merged, they are guaranteed to converge to the same state without
//! requiring coordination or consensus.
//!
//! This crate implements the LWW-Element-Graph: a directed graph whose
//! vertices and edges can be concurrently added and removed. Every add and
//! remove is recorded with a timestamp, and the later timestamp wins when
//! replicas disagree. Removal never deletes anything; it records a tombstone
//! next to the original add, so merges commute regardless of delivery order.
//!
//! ## Quick Start
//!
//! ```
//! use lww_graph::prelude::*;
//!
//! let mut g = LWWGraph::new();
//! let a = Vertex::new("a");
//! let b = Vertex::new("b");
//!
//! g.add_vertex(a.clone());
//! g.add_vertex(b.clone());
//! g.add_edge(a.clone(), b.clone(), Direction::Directed);
//!
//! assert!(g.contains_edge(&Edge::new(a, b)));
//! ```
//!
//! ## Replication model
//!
//! The graph is a CvRDT: replicas mutate their own copy and exchange full
//! state snapshots. [`Crdt::merge`] is the only synchronization primitive and
//! is commutative, associative, and idempotent, so any replica may merge any
//! snapshot (including its own) at any time.
//!
//! Mutators come in two forms: a wall-clock convenience form (`add_vertex`,
//! requires the `std` feature) and an explicit-timestamp form
//! (`add_vertex_at`) for deterministic behavior and testing. The core never
//! reads a clock outside the convenience wrappers.
//!
//! ## Components
//!
//! - [`Vertex`] - an immutable wrapper around one payload value
//! - [`Edge`] - an ordered pair of vertices; direction matters
//! - [`LWWElementSet`] - a grow-only element-to-timestamp map
//! - [`LWWGraph`] - four element sets plus graph semantics on top

mod crdt;
mod edge;
mod graph;
mod lww_set;
mod vertex;

pub mod prelude;

pub use crdt::Crdt;
pub use edge::Edge;
pub use graph::{Direction, LWWGraph};
pub use lww_set::{LWWElementSet, Timestamp};
pub use vertex::Vertex;
