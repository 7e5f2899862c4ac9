//! Lineage Dispatcher and Pipeline/Union Tracers
//!
//! [`Tracer`] replays a transformer structure against a feature list and
//! extends the lineage graph according to each stage's declared shape. It
//! never computes values: it answers "what happened to these features", not
//! "what are the new values".
//!
//! A structure is a tree of [`Stage`]s: plain transformers, sequential
//! [`Pipeline`]s, and parallel [`FeatureUnion`]s, nested arbitrarily. The
//! dispatcher consults each transformer's capability contract and routes to
//! the matching adapter; composites are traced recursively.

use crate::adapters::{apply_expansion, apply_opaque, apply_projection, apply_selector};
use crate::error::{FilamentError, Result};
use crate::feature::FeatureRef;
use crate::transformer::Transformer;
use rayon::prelude::*;
use tracing::debug;

/// One stage in a transformer structure.
pub enum Stage {
    /// A plain transformer exposing the capability contract
    Transform(Box<dyn Transformer>),
    /// A nested sequential pipeline
    Pipeline(Pipeline),
    /// A nested parallel feature union
    Union(FeatureUnion),
}

impl Stage {
    /// Wrap a transformer as a stage.
    pub fn transform<T: Transformer + 'static>(transformer: T) -> Self {
        Stage::Transform(Box::new(transformer))
    }
}

/// An ordered list of named stages applied sequentially.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<(String, Stage)>,
}

impl Pipeline {
    /// Empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named step.
    pub fn step(mut self, name: impl Into<String>, stage: Stage) -> Self {
        self.steps.push((name.into(), stage));
        self
    }

    /// The ordered step list.
    pub fn steps(&self) -> &[(String, Stage)] {
        &self.steps
    }
}

/// One branch of a feature union: a named stage applied to a fixed
/// column-index slice of the union's input feature list.
pub struct Branch {
    /// Branch name, used in error reports
    pub name: String,
    /// Column indices this branch consumes, in slice order
    pub columns: Vec<usize>,
    /// The stage applied to the sliced feature list
    pub stage: Stage,
}

/// Parallel feature union: each branch independently consumes its column
/// slice; branch outputs are concatenated in declaration order, mirroring
/// how the union's numeric outputs are stacked.
#[derive(Default)]
pub struct FeatureUnion {
    branches: Vec<Branch>,
    parallel: bool,
}

impl FeatureUnion {
    /// Empty union, evaluated sequentially.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a branch consuming `columns` of the input feature list.
    pub fn branch(mut self, name: impl Into<String>, columns: Vec<usize>, stage: Stage) -> Self {
        self.branches.push(Branch {
            name: name.into(),
            columns,
            stage,
        });
        self
    }

    /// Evaluate branches on the rayon pool. Output order is unaffected:
    /// results are concatenated in declaration order either way.
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// The declared branch list.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }
}

/// Walks a transformer structure and extends the lineage graph.
///
/// The default tracer falls back to the opaque adapter for transformers
/// with no declared shape; a [strict](Tracer::strict) tracer fails with
/// [`FilamentError::UnsupportedTransformerShape`] instead.
#[derive(Debug, Clone, Default)]
pub struct Tracer {
    strict: bool,
}

impl Tracer {
    /// Tracer with the opaque fallback enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracer that rejects transformers declaring no shape contract.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Trace one stage against the current feature list and return the
    /// output feature list.
    ///
    /// Capability precedence when a transformer declares several contracts
    /// is fixed: selection mask, then expansion counts, then output
    /// components, then nested composite, else the opaque fallback.
    pub fn trace(&self, stage: &Stage, inputs: &[FeatureRef]) -> Result<Vec<FeatureRef>> {
        match stage {
            Stage::Transform(t) => self.dispatch(t.as_ref(), inputs),
            Stage::Pipeline(p) => self.trace_pipeline(p, inputs),
            Stage::Union(u) => self.trace_union(u, inputs),
        }
    }

    fn dispatch(&self, transformer: &dyn Transformer, inputs: &[FeatureRef]) -> Result<Vec<FeatureRef>> {
        let n = inputs.len();
        if let Some(mask) = transformer.selection_mask(n) {
            debug!(label = transformer.label(), n, "dispatch: selector");
            return apply_selector(&mask, inputs);
        }
        if let Some(counts) = transformer.expansion_counts(n) {
            debug!(label = transformer.label(), n, "dispatch: expansion");
            return apply_expansion(transformer.label(), &counts, inputs);
        }
        if let Some(components) = transformer.output_components(n) {
            debug!(label = transformer.label(), n, components, "dispatch: projection");
            return Ok(apply_projection(transformer.label(), components, inputs));
        }
        if self.strict {
            return Err(FilamentError::UnsupportedTransformerShape(
                transformer.label().to_string(),
            ));
        }
        debug!(label = transformer.label(), n, "dispatch: opaque fallback");
        Ok(apply_opaque(transformer.label(), inputs))
    }

    /// Thread a feature list through a pipeline's stages in order.
    ///
    /// The final stage is traced only if it has a transform-like output
    /// contract; a terminal estimator leaves the lineage at the
    /// second-to-last stage's output. Lineage for such a final stage is
    /// undefined by design, not an error.
    pub fn trace_pipeline(&self, pipeline: &Pipeline, inputs: &[FeatureRef]) -> Result<Vec<FeatureRef>> {
        let steps = pipeline.steps();
        let mut current = inputs.to_vec();
        for (i, (name, stage)) in steps.iter().enumerate() {
            let last = i + 1 == steps.len();
            if last {
                if let Stage::Transform(t) = stage {
                    if !t.is_transform() {
                        debug!(step = name.as_str(), "pipeline: terminal estimator, lineage stops");
                        break;
                    }
                }
            }
            debug!(step = name.as_str(), n_in = current.len(), "pipeline: tracing step");
            current = self.trace(stage, &current)?;
        }
        Ok(current)
    }

    /// Trace each union branch on its column slice and concatenate the
    /// branch outputs in declaration order.
    ///
    /// All column indices are bounds-checked against the input feature list
    /// before any branch runs, so a failing union extends nothing.
    pub fn trace_union(&self, union: &FeatureUnion, inputs: &[FeatureRef]) -> Result<Vec<FeatureRef>> {
        for branch in union.branches() {
            if let Some(&index) = branch.columns.iter().find(|&&c| c >= inputs.len()) {
                return Err(FilamentError::BranchIndexMismatch {
                    branch: branch.name.clone(),
                    index,
                    len: inputs.len(),
                });
            }
        }

        let run = |branch: &Branch| -> Result<Vec<FeatureRef>> {
            let slice: Vec<FeatureRef> = branch
                .columns
                .iter()
                .map(|&c| inputs[c].clone())
                .collect();
            debug!(branch = branch.name.as_str(), n_in = slice.len(), "union: tracing branch");
            self.trace(&branch.stage, &slice)
        };

        let outputs: Vec<Vec<FeatureRef>> = if union.parallel {
            union.branches().par_iter().map(run).collect::<Result<_>>()?
        } else {
            union.branches().iter().map(run).collect::<Result<_>>()?
        };

        Ok(outputs.into_iter().flatten().collect())
    }
}
