//! Transformer Capability Contract
//!
//! The lineage core never inspects concrete transformer types. Instead,
//! every transformer declares which shape contract(s) it satisfies through
//! the [`Transformer`] trait, and the dispatcher consults that declaration.
//! New transformer kinds plug in by implementing the contract — no
//! special-casing of named library classes.
//!
//! A shape is a transformer's input-to-output cardinality pattern:
//!
//! - **one-to-one** — a keep mask over the input columns ([`Transformer::selection_mask`])
//! - **one-to-many** — per-column expansion counts ([`Transformer::expansion_counts`])
//! - **many-to-many** — a dense projection onto `m` components ([`Transformer::output_components`])
//! - **opaque** — none of the above; output identity relative to inputs is unknown
//!
//! The stock implementations in this module carry shape metadata only. The
//! numeric transforms themselves (fitting, transforming arrays) are external
//! collaborators and out of scope here.

/// Capability contract a transformer exposes to the lineage dispatcher.
///
/// All shape queries default to `None`; a transformer that overrides none of
/// them is opaque. The queries take the input column count so that
/// transformers which derive their shape from the data they were fitted on
/// can answer per call site.
pub trait Transformer: Send + Sync {
    /// Generic label describing this transformer's kind, used for edge
    /// labels when no more specific shape applies and for error messages.
    fn label(&self) -> &str;

    /// Whether this stage has a transform-like output contract. A terminal
    /// estimator (a predictor with no feature-shaped output) returns
    /// `false`, and a pipeline's lineage stops just before it.
    fn is_transform(&self) -> bool {
        true
    }

    /// One-to-one contract: a per-column keep mask of the same length as
    /// the input feature list.
    fn selection_mask(&self, _n_inputs: usize) -> Option<Vec<bool>> {
        None
    }

    /// One-to-many contract: per-column category counts. Column *i* expands
    /// into `counts[i]` output features.
    fn expansion_counts(&self, _n_inputs: usize) -> Option<Vec<usize>> {
        None
    }

    /// Many-to-many contract: output dimensionality of a dense projection
    /// in which every output depends on every input.
    fn output_components(&self, _n_inputs: usize) -> Option<usize> {
        None
    }
}

/// One-to-one selector carrying a fixed keep mask.
#[derive(Debug, Clone)]
pub struct ColumnSelector {
    mask: Vec<bool>,
}

impl ColumnSelector {
    /// Selector keeping exactly the columns where `mask` is `true`.
    pub fn new(mask: Vec<bool>) -> Self {
        Self { mask }
    }

    /// Identity selector over `n` columns.
    pub fn identity(n: usize) -> Self {
        Self {
            mask: vec![true; n],
        }
    }
}

impl Transformer for ColumnSelector {
    fn label(&self) -> &str {
        "select"
    }

    fn selection_mask(&self, _n_inputs: usize) -> Option<Vec<bool>> {
        Some(self.mask.clone())
    }
}

/// One-to-many categorical encoder carrying per-column category counts.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    counts: Vec<usize>,
    label: String,
}

impl CategoricalEncoder {
    /// Encoder expanding column *i* into `counts[i]` category features.
    pub fn new(counts: Vec<usize>) -> Self {
        Self {
            counts,
            label: "onehot".to_string(),
        }
    }

    /// Override the edge label (default `"onehot"`).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Transformer for CategoricalEncoder {
    fn label(&self) -> &str {
        &self.label
    }

    fn expansion_counts(&self, _n_inputs: usize) -> Option<Vec<usize>> {
        Some(self.counts.clone())
    }
}

/// Many-to-many dense projector (dimensionality reduction) with a fixed
/// output component count.
#[derive(Debug, Clone)]
pub struct LinearProjector {
    components: usize,
    label: String,
}

impl LinearProjector {
    /// Projector onto `components` output components.
    pub fn new(components: usize) -> Self {
        Self {
            components,
            label: "pca".to_string(),
        }
    }

    /// Override the component label prefix (default `"pca"`).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Transformer for LinearProjector {
    fn label(&self) -> &str {
        &self.label
    }

    fn output_components(&self, _n_inputs: usize) -> Option<usize> {
        Some(self.components)
    }
}

/// Transformer with no declared shape. Each input maps to a single new
/// output under this transformer's label (a scaler or imputer, say).
#[derive(Debug, Clone)]
pub struct OpaqueTransformer {
    label: String,
}

impl OpaqueTransformer {
    /// Opaque transformer labeled `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Transformer for OpaqueTransformer {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Terminal estimator: a predictor with no feature-shaped output contract.
/// Lineage is not extended through it.
#[derive(Debug, Clone)]
pub struct Estimator {
    label: String,
}

impl Estimator {
    /// Estimator labeled `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Transformer for Estimator {
    fn label(&self) -> &str {
        &self.label
    }

    fn is_transform(&self) -> bool {
        false
    }
}
