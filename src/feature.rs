//! Feature Lineage Nodes
//!
//! The lineage graph is built from [`Feature`] nodes connected by labeled
//! [`TransformEdge`]s. Each feature records, in insertion order, the
//! transforms that were applied to it and the downstream features they
//! produced. Edges point forward only: a downstream feature holds no
//! back-reference to its inputs.
//!
//! Features are shared as [`FeatureRef`] (`Arc<Feature>`) because a derived
//! feature can be reachable from several upstream features at once — a dense
//! projection links every input to every output. Identity is the
//! process-unique [`FeatureId`], never the name and never value equality:
//! two distinct derived features may carry the same name.
//!
//! Edge appends go through a write lock, so two union branches that share an
//! input feature can record transforms concurrently without losing updates.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Process-unique identifier of a lineage node.
///
/// Assigned at construction and immutable for the feature's lifetime. Used
/// as the graph-node key in exports and layouts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeatureId(u64);

impl FeatureId {
    fn next() -> Self {
        FeatureId(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Shared handle to a lineage node.
pub type FeatureRef = Arc<Feature>;

/// An edge from a feature to a feature it was transformed into, labeled
/// with the kind of transform applied (`"init"`, `"select"`, `"pca:0"`, …).
#[derive(Debug, Clone)]
pub struct TransformEdge {
    /// Human-readable description of the transform kind
    pub label: String,
    /// The downstream feature this transform produced
    pub target: FeatureRef,
}

/// A node in the lineage graph: a named feature with outgoing transform
/// edges.
///
/// Names are display labels and need not be unique; [`FeatureId`] is the
/// identity. The edge list is append-only — applying a transform extends a
/// consumed feature, it never rewrites it.
#[derive(Debug)]
pub struct Feature {
    name: String,
    id: FeatureId,
    transforms: RwLock<Vec<TransformEdge>>,
}

impl Feature {
    /// Create a new feature with a fresh process-unique id.
    pub fn new(name: impl Into<String>) -> FeatureRef {
        Arc::new(Feature {
            name: name.into(),
            id: FeatureId::next(),
            transforms: RwLock::new(Vec::new()),
        })
    }

    /// Display name supplied at creation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Process-unique identifier.
    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// Record a transform: append an edge labeled `label` pointing at
    /// `target`.
    ///
    /// Appends are exclusive; concurrent recorders on the same feature
    /// serialize instead of losing updates.
    pub fn transform(&self, label: impl Into<String>, target: FeatureRef) {
        self.transforms.write().push(TransformEdge {
            label: label.into(),
            target,
        });
    }

    /// Snapshot of the outgoing edges, in the order transforms were
    /// recorded.
    pub fn transforms(&self) -> Vec<TransformEdge> {
        self.transforms.read().clone()
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.transforms.read().len()
    }
}

/// Build the root of a lineage graph from raw input feature names.
///
/// The root is a distinguished feature named `"root"` whose children are
/// exactly the supplied names, in order, each linked by an `"init"` edge.
pub fn init_root<S: AsRef<str>>(names: &[S]) -> FeatureRef {
    let root = Feature::new("root");
    for name in names {
        root.transform("init", Feature::new(name.as_ref()));
    }
    root
}

/// Children of a feature, in edge order. For a root built by [`init_root`]
/// this is the raw input feature list.
pub fn children(feature: &FeatureRef) -> Vec<FeatureRef> {
    feature
        .transforms()
        .into_iter()
        .map(|edge| edge.target)
        .collect()
}
