// Host graph collaborators.
//
// The layout never owns graph storage. It reads topology and writes node
// positions through two traits:
// - GraphView: the scoped shared-read acquisition point. `read()` returns a
//   guard that is held for one whole pass and released when dropped.
// - Topology: the queries available while the guard is held.
//
// memory.rs provides MemoryGraph, a petgraph-backed reference host used by
// the wasm binding and the tests.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

mod memory;

pub use memory::{MemoryGraph, MemoryTopology};

/// A 2D position in layout space. The origin is the layout center.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Topology and position access, valid while a read guard is held.
pub trait Topology {
    /// Host node handle. Cheap to clone, stable for the duration of a pass.
    type Node: Clone + Eq + Hash + Debug;

    /// All nodes, in the host's enumeration order.
    fn nodes(&self) -> Vec<Self::Node>;

    fn is_directed(&self) -> bool;

    /// Every node sharing an edge with `node`, regardless of direction.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Targets of the edges leaving `node`.
    fn successors(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn find_by_id(&self, id: &str) -> Option<Self::Node>;

    fn node_id(&self, node: &Self::Node) -> String;

    /// `None` means the host has no position data for this node.
    fn position(&self, node: &Self::Node) -> Option<Point>;

    fn set_position(&self, node: &Self::Node, position: Point);

    /// The nodes one hop further from the root: successors for directed
    /// graphs, neighbors otherwise.
    fn adjacent(&self, node: &Self::Node) -> Vec<Self::Node> {
        if self.is_directed() {
            self.successors(node)
        } else {
            self.neighbors(node)
        }
    }
}

/// A graph that can hand out a read-stable view of its topology.
pub trait GraphView {
    type Node: Clone + Eq + Hash + Debug;

    type Guard<'a>: Topology<Node = Self::Node>
    where
        Self: 'a;

    /// Acquire shared read access. Structural mutation is blocked until the
    /// guard is dropped.
    fn read(&self) -> Self::Guard<'_>;
}
