//! # Filament - Feature Lineage Tracking
//!
//! Filament tracks the provenance of features as they pass through a
//! composition of data transformers arranged in a pipeline or a parallel
//! feature union. Given a named list of raw input features, it reconstructs
//! which derived output feature(s) each raw feature contributes to,
//! recording at each step a human-readable label for the kind of transform
//! applied. The result is a lineage DAG from raw inputs to final outputs,
//! usable for auditing, debugging, and visualization of feature-engineering
//! pipelines.
//!
//! ## Quick Start
//!
//! ```rust
//! use filament::{
//!     children, fall_layout, init_root, ColumnSelector, LineageGraph, Pipeline, Stage, Tracer,
//! };
//!
//! fn main() -> filament::Result<()> {
//!     // Root of the lineage graph: one child per raw feature name.
//!     let root = init_root(&["age", "income", "city"]);
//!     let inputs = children(&root);
//!
//!     // A pipeline that keeps the two numeric columns.
//!     let pipeline = Pipeline::new().step(
//!         "keep_numeric",
//!         Stage::transform(ColumnSelector::new(vec![true, true, false])),
//!     );
//!
//!     // Replay it against the feature list; the graph grows as a side
//!     // effect.
//!     let outputs = Tracer::new().trace_pipeline(&pipeline, &inputs)?;
//!     assert_eq!(outputs.len(), 2);
//!
//!     // Everything an external renderer needs: labels and coordinates.
//!     let graph = LineageGraph::from_root(&root);
//!     let coords = fall_layout(&root)?;
//!     assert_eq!(coords.len(), graph.nodes.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **Capability dispatch**: transformers declare their shape (one-to-one,
//!   one-to-many, many-to-many, or opaque) through the
//!   [`Transformer`] trait; the tracer never inspects concrete types.
//! - **Pure data out**: the crate performs no numeric transforms and owns
//!   no rendering. Its outputs are the lineage graph snapshot, label maps,
//!   and a deterministic layered layout.
//! - **Identity by id**: lineage nodes carry a process-unique [`FeatureId`];
//!   same-named derived features are never unified.

#![warn(missing_docs)]

// ── Core ─────────────────────────────────────────────────────────────────────
// Lineage nodes, errors, and the transformer capability contract.
pub mod error;
pub mod feature;
pub mod transformer;

// ── Tracing ──────────────────────────────────────────────────────────────────
// Shape adapters and the pipeline/union dispatcher.
pub mod adapters;
pub mod trace;

// ── Output ───────────────────────────────────────────────────────────────────
// Graph validation, renderer snapshot, and layered layout.
pub mod graph;
pub mod layout;

pub use error::{ErrorCode, FilamentError, Result};
pub use feature::{children, init_root, Feature, FeatureId, FeatureRef, TransformEdge};
pub use graph::{detect_cycles, GraphEdge, GraphNode, LineageGraph};
pub use layout::{fall_layout, fall_layout_with, LayoutConfig, Point2D};
pub use trace::{Branch, FeatureUnion, Pipeline, Stage, Tracer};
pub use transformer::{
    CategoricalEncoder, ColumnSelector, Estimator, LinearProjector, OpaqueTransformer,
    Transformer,
};
