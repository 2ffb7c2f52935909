// In-memory host graph backed by petgraph.
//
// - Topology lives in a StableGraph behind an RwLock. A layout pass holds the
//   read side for its whole duration; add/remove operations take the write side.
// - Each node's position sits behind its own Mutex, so a pass can write
//   positions while only holding the shared read guard.
// - Enumeration order (nodes and neighbors) is node insertion order. StableGraph
//   reuses vacant indices after removals, so the order is tracked explicitly.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};

use super::{GraphView, Point, Topology};
use crate::error::GraphError;
use crate::output::GraphInput;

#[derive(Debug)]
struct NodeRecord {
    id: String,
    /// Insertion sequence number.
    order: u64,
    position: Mutex<Option<Point>>,
}

impl NodeRecord {
    fn position(&self) -> Option<Point> {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_position(&self, position: Point) {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = Some(position);
    }
}

#[derive(Debug, Default)]
struct Inner {
    graph: StableGraph<NodeRecord, ()>,
    index: HashMap<String, NodeIndex>,
    next_order: u64,
}

impl Inner {
    fn order_of(&self, nid: NodeIndex) -> u64 {
        self.graph.node_weight(nid).map(|n| n.order).unwrap_or(u64::MAX)
    }

    fn in_insertion_order(&self, nodes: impl Iterator<Item = NodeIndex>) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = nodes.collect();
        out.sort_by_key(|&nid| self.order_of(nid));
        // Parallel edges and self-loops show up more than once.
        out.dedup();
        out
    }

    fn lookup(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }
}

/// Reference host graph: string ids, optional positions, directed or undirected edges.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    directed: bool,
    inner: RwLock<Inner>,
}

impl MemoryGraph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Build a graph from the host binding's JSON input shape.
    /// A node without both `x` and `y` is added without position data.
    pub fn from_input(input: &GraphInput) -> Result<Self, GraphError> {
        let graph = Self::new(input.directed);
        for node in &input.nodes {
            match (node.x, node.y) {
                (Some(x), Some(y)) => graph.add_node(&node.id, Point::new(x, y))?,
                _ => graph.add_unplaced_node(&node.id)?,
            }
        }
        for edge in &input.edges {
            graph.add_edge(&edge.from, &edge.to)?;
        }
        Ok(graph)
    }

    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let input: GraphInput = serde_json::from_str(json)?;
        Self::from_input(&input)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn shared(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn add_node(&self, id: &str, position: Point) -> Result<(), GraphError> {
        self.insert_node(id, Some(position))
    }

    /// Add a node the host has no position data for.
    pub fn add_unplaced_node(&self, id: &str) -> Result<(), GraphError> {
        self.insert_node(id, None)
    }

    fn insert_node(&self, id: &str, position: Option<Point>) -> Result<(), GraphError> {
        let mut inner = self.write();
        if inner.index.contains_key(id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        let order = inner.next_order;
        inner.next_order += 1;
        let nid = inner.graph.add_node(NodeRecord {
            id: id.to_string(),
            order,
            position: Mutex::new(position),
        });
        inner.index.insert(id.to_string(), nid);
        Ok(())
    }

    pub fn add_edge(&self, from: &str, to: &str) -> Result<(), GraphError> {
        let mut inner = self.write();
        let a = inner.lookup(from)?;
        let b = inner.lookup(to)?;
        inner.graph.add_edge(a, b, ());
        Ok(())
    }

    /// Remove a node and all of its edges.
    pub fn remove_node(&self, id: &str) -> Result<(), GraphError> {
        let mut inner = self.write();
        let nid = inner.lookup(id)?;
        inner.graph.remove_node(nid);
        inner.index.remove(id);
        Ok(())
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        let inner = self.shared();
        let nid = inner.index.get(id)?;
        inner.graph.node_weight(*nid)?.position()
    }

    pub fn set_position(&self, id: &str, position: Point) -> Result<(), GraphError> {
        let inner = self.shared();
        let nid = inner.lookup(id)?;
        if let Some(record) = inner.graph.node_weight(nid) {
            record.set_position(position);
        }
        Ok(())
    }

    /// All `(id, position)` pairs in insertion order.
    pub fn positions(&self) -> Vec<(String, Option<Point>)> {
        let inner = self.shared();
        inner
            .in_insertion_order(inner.graph.node_indices())
            .into_iter()
            .filter_map(|nid| inner.graph.node_weight(nid))
            .map(|record| (record.id.clone(), record.position()))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.shared().graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.shared().graph.edge_count()
    }
}

/// Read guard over a [`MemoryGraph`], held for one layout pass.
pub struct MemoryTopology<'a> {
    directed: bool,
    inner: RwLockReadGuard<'a, Inner>,
}

impl Topology for MemoryTopology<'_> {
    type Node = NodeIndex;

    fn nodes(&self) -> Vec<NodeIndex> {
        self.inner.in_insertion_order(self.inner.graph.node_indices())
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn neighbors(&self, node: &NodeIndex) -> Vec<NodeIndex> {
        self.inner
            .in_insertion_order(self.inner.graph.neighbors_undirected(*node))
    }

    fn successors(&self, node: &NodeIndex) -> Vec<NodeIndex> {
        if !self.directed {
            return self.neighbors(node);
        }
        self.inner.in_insertion_order(
            self.inner
                .graph
                .neighbors_directed(*node, Direction::Outgoing),
        )
    }

    fn find_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.inner.index.get(id).copied()
    }

    fn node_id(&self, node: &NodeIndex) -> String {
        self.inner
            .graph
            .node_weight(*node)
            .map(|n| n.id.clone())
            .unwrap_or_default()
    }

    fn position(&self, node: &NodeIndex) -> Option<Point> {
        self.inner.graph.node_weight(*node)?.position()
    }

    fn set_position(&self, node: &NodeIndex, position: Point) {
        if let Some(record) = self.inner.graph.node_weight(*node) {
            record.set_position(position);
        }
    }
}

impl GraphView for MemoryGraph {
    type Node = NodeIndex;

    type Guard<'a> = MemoryTopology<'a>;

    fn read(&self) -> MemoryTopology<'_> {
        MemoryTopology {
            directed: self.directed,
            inner: self.shared(),
        }
    }
}
