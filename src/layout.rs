//! Layered ("fall") Layout
//!
//! Assigns 2-D coordinates to lineage nodes for external rendering. Nodes
//! are grouped into levels by BFS depth from the root, then fanned out
//! within each level: node *i* of a level with *n* nodes sits at
//! `(level * x_spacing, (i - n/2) * y_spacing)`, a centered, deterministic
//! separation. No edge-crossing minimization is attempted — the output is a
//! drawing hint, not an optimal embedding.
//!
//! Cycle detection runs first and a cyclic graph aborts the layout before
//! any coordinates are produced.

use crate::error::Result;
use crate::feature::{FeatureId, FeatureRef};
use crate::graph::detect_cycles;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// A 2-D coordinate produced for one lineage node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal-like coordinate: `level * x_spacing`
    pub x: f32,
    /// Vertical-like coordinate, centered around 0 within the level
    pub y: f32,
}

/// Spacing between levels and between nodes within a level.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Distance between consecutive levels
    pub x_spacing: f32,
    /// Distance between consecutive nodes within a level
    pub y_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_spacing: 1.0,
            y_spacing: 1.0,
        }
    }
}

/// Compute the layered layout with default spacing.
pub fn fall_layout(root: &FeatureRef) -> Result<HashMap<FeatureId, Point2D>> {
    fall_layout_with(root, &LayoutConfig::default())
}

/// Compute the layered layout for the graph reachable from `root`.
///
/// Leveling uses an explicit work queue. A node reachable via multiple
/// paths is leveled by the depth at which it is first discovered; later
/// re-discoveries are skipped — revisits are expected in a DAG and are not
/// an error. Within a level, nodes keep discovery order, which follows edge
/// recording order, so the result is fully deterministic for a given graph.
pub fn fall_layout_with(
    root: &FeatureRef,
    config: &LayoutConfig,
) -> Result<HashMap<FeatureId, Point2D>> {
    detect_cycles(root)?;

    let mut leveled: HashMap<FeatureId, usize> = HashMap::new();
    let mut buckets: Vec<Vec<FeatureId>> = vec![vec![root.id()]];
    let mut queue: VecDeque<(FeatureRef, usize)> = VecDeque::new();

    leveled.insert(root.id(), 0);
    queue.push_back((root.clone(), 0));

    while let Some((node, level)) = queue.pop_front() {
        for edge in node.transforms() {
            let id = edge.target.id();
            if leveled.contains_key(&id) {
                // First discovery wins.
                continue;
            }
            let next = level + 1;
            leveled.insert(id, next);
            if buckets.len() <= next {
                buckets.push(Vec::new());
            }
            buckets[next].push(id);
            queue.push_back((edge.target, next));
        }
    }

    let mut layout = HashMap::new();
    for (level, bucket) in buckets.iter().enumerate() {
        let n = bucket.len() as f32;
        for (i, &id) in bucket.iter().enumerate() {
            layout.insert(
                id,
                Point2D {
                    x: level as f32 * config.x_spacing,
                    y: (i as f32 - n / 2.0) * config.y_spacing,
                },
            );
        }
    }
    Ok(layout)
}
