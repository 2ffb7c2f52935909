// Hop partitioning: breadth-first tiers around a root.
//
// - The root is resolved by id. An unknown id falls back to the first node in
//   host enumeration order, and the substitution is reported to the caller.
// - Tier 1 is the root's adjacency (successors when directed), tier k+1 is the
//   unvisited adjacency of tier k.
// - If the frontier runs dry while nodes remain (disconnected graph, or nodes
//   only reachable against edge direction), all leftovers form one final tier.
// - Membership checks use a HashSet; frontier order is first-discovery order.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::debug;

use super::TierOrder;
use crate::error::LayoutError;
use crate::graph::Topology;

/// Reported when the requested root id did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSubstitution {
    pub requested: String,
    pub chosen: String,
}

/// Result of partitioning: the root and its tiers, tier 1 first.
#[derive(Debug, Clone)]
pub struct Partition<N> {
    pub root: N,
    pub substitution: Option<RootSubstitution>,
    pub tiers: Vec<Vec<N>>,
}

impl<N: Clone + Eq + Hash> Partition<N> {
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Number of nodes placed in tiers (the root is not counted).
    pub fn placed_count(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    /// 1-based tier number of `node`, `Some(0)` for the root.
    pub fn tier_of(&self, node: &N) -> Option<usize> {
        if *node == self.root {
            return Some(0);
        }
        self.tiers
            .iter()
            .position(|tier| tier.contains(node))
            .map(|i| i + 1)
    }
}

/// Resolve the root and split every other node into hop tiers.
pub fn partition<T: Topology>(
    topo: &T,
    root_id: &str,
    order: TierOrder,
) -> Result<Partition<T::Node>, LayoutError> {
    let nodes = topo.nodes();
    let Some(first) = nodes.first() else {
        return Err(LayoutError::EmptyGraph);
    };

    let (root, substitution) = match topo.find_by_id(root_id) {
        Some(root) => (root, None),
        None => {
            let chosen = topo.node_id(first);
            debug!("root '{}' not found, using '{}'", root_id, chosen);
            (
                first.clone(),
                Some(RootSubstitution {
                    requested: root_id.to_string(),
                    chosen,
                }),
            )
        }
    };

    let mut unvisited: HashSet<T::Node> = nodes.iter().cloned().collect();
    unvisited.remove(&root);

    let mut tiers: Vec<Vec<T::Node>> = Vec::new();
    let mut frontier = unvisited_frontier(topo.adjacent(&root), &unvisited);

    while !unvisited.is_empty() {
        if frontier.is_empty() {
            // Nothing reachable is left: the remainder becomes one tier.
            frontier = nodes
                .iter()
                .filter(|n| unvisited.contains(*n))
                .cloned()
                .collect();
        }

        for node in &frontier {
            unvisited.remove(node);
        }

        let reached = frontier.iter().flat_map(|node| topo.adjacent(node));
        let next = unvisited_frontier(reached, &unvisited);

        tiers.push(std::mem::replace(&mut frontier, next));
    }

    if order == TierOrder::ById {
        sort_tiers_by_id(topo, &mut tiers);
    }

    debug!(
        "partitioned {} nodes into {} tiers around '{}'",
        nodes.len(),
        tiers.len(),
        topo.node_id(&root)
    );

    Ok(Partition {
        root,
        substitution,
        tiers,
    })
}

/// De-duplicate `reached`, keep only unvisited nodes, preserve first-seen order.
fn unvisited_frontier<N: Clone + Eq + Hash>(
    reached: impl IntoIterator<Item = N>,
    unvisited: &HashSet<N>,
) -> Vec<N> {
    let mut seen: HashSet<N> = HashSet::new();
    reached
        .into_iter()
        .filter(|n| unvisited.contains(n) && seen.insert(n.clone()))
        .collect()
}

fn sort_tiers_by_id<T: Topology>(topo: &T, tiers: &mut [Vec<T::Node>]) {
    for tier in tiers.iter_mut() {
        let ids: HashMap<T::Node, String> = tier
            .iter()
            .map(|n| (n.clone(), topo.node_id(n)))
            .collect();
        tier.sort_by(|a, b| ids[a].cmp(&ids[b]));
    }
}
