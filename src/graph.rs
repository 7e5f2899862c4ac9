//! Graph Validation and Renderer Export
//!
//! [`detect_cycles`] verifies the lineage reachable from a root is acyclic,
//! and [`LineageGraph`] is the pure-data snapshot handed to an external
//! renderer: node list, labeled edge list, and map accessors for node and
//! edge labels. The crate owns no drawing mechanism — the snapshot plus the
//! layout from [`crate::layout`] is the entire rendering contract.

use crate::error::{FilamentError, Result};
use crate::feature::{FeatureId, FeatureRef};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Verify the lineage graph reachable from `root` is acyclic.
///
/// Depth-first traversal maintaining a "currently on path" set: revisiting
/// a node already on the path is a cycle. A node reached again via a
/// different path that is not an ancestor is legal — the graph is a DAG,
/// not a tree, and shared downstream features (as created by dense
/// projections) are expected. The traversal runs to exhaustion over all
/// reachable nodes, not merely until the first leaf.
pub fn detect_cycles(root: &FeatureRef) -> Result<()> {
    let mut on_path = HashSet::new();
    let mut done = HashSet::new();
    visit(root, &mut on_path, &mut done)
}

fn visit(
    node: &FeatureRef,
    on_path: &mut HashSet<FeatureId>,
    done: &mut HashSet<FeatureId>,
) -> Result<()> {
    let id = node.id();
    if on_path.contains(&id) {
        return Err(FilamentError::GraphCyclic(node.name().to_string()));
    }
    if done.contains(&id) {
        return Ok(());
    }
    on_path.insert(id);
    for edge in node.transforms() {
        visit(&edge.target, on_path, done)?;
    }
    on_path.remove(&id);
    done.insert(id);
    Ok(())
}

/// A node in the exported lineage graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node key, unique within the process
    pub id: FeatureId,
    /// Display name
    pub name: String,
}

/// A labeled directed edge in the exported lineage graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Upstream node
    pub from: FeatureId,
    /// Downstream node
    pub to: FeatureId,
    /// Transform-kind label recorded on the edge
    pub label: String,
}

/// Serializable snapshot of a lineage graph: everything an external
/// renderer needs besides coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageGraph {
    /// Nodes in discovery order, root first
    pub nodes: Vec<GraphNode>,
    /// Edges in discovery order
    pub edges: Vec<GraphEdge>,
}

impl LineageGraph {
    /// Snapshot the graph reachable from `root`.
    ///
    /// Traversal order is deterministic: depth-first, following each node's
    /// edges in recording order. Shared nodes appear once; every edge
    /// appears, including parallel edges between the same node pair.
    pub fn from_root(root: &FeatureRef) -> Self {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut seen = HashSet::new();

        let mut stack = vec![root.clone()];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id()) {
                continue;
            }
            nodes.push(GraphNode {
                id: node.id(),
                name: node.name().to_string(),
            });
            let outgoing = node.transforms();
            for edge in &outgoing {
                edges.push(GraphEdge {
                    from: node.id(),
                    to: edge.target.id(),
                    label: edge.label.clone(),
                });
            }
            // Reverse push so the first-recorded edge is explored first.
            for edge in outgoing.into_iter().rev() {
                if !seen.contains(&edge.target.id()) {
                    stack.push(edge.target);
                }
            }
        }

        LineageGraph { nodes, edges }
    }

    /// Node-label mapping for the renderer: node id to display name.
    pub fn node_labels(&self) -> HashMap<FeatureId, &str> {
        self.nodes
            .iter()
            .map(|n| (n.id, n.name.as_str()))
            .collect()
    }

    /// Edge-label mapping for the renderer: ordered node-id pair to
    /// transform-kind label. If parallel edges connect the same pair, the
    /// last-recorded label wins.
    pub fn edge_labels(&self) -> HashMap<(FeatureId, FeatureId), &str> {
        self.edges
            .iter()
            .map(|e| ((e.from, e.to), e.label.as_str()))
            .collect()
    }
}
