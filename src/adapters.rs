//! Lineage Adapters
//!
//! One adapter per transformer shape. Each takes the current feature list
//! plus the transformer's declared shape parameters, appends transform
//! edges to the consumed inputs, and returns the new output feature list of
//! the size the shape dictates. Inputs are only ever extended, never
//! rewritten.

use crate::error::{FilamentError, Result};
use crate::feature::{Feature, FeatureRef};

/// Opaque shape: output identity relative to inputs is unknown, so each
/// input maps to one new output under the transformer's generic label.
pub fn apply_opaque(label: &str, inputs: &[FeatureRef]) -> Vec<FeatureRef> {
    inputs
        .iter()
        .map(|input| {
            let output = Feature::new(input.name());
            input.transform(label, output.clone());
            output
        })
        .collect()
}

/// One-to-one shape: keep the columns where `mask` is `true`.
///
/// Kept inputs get a `"select"` edge to a same-named output; dropped inputs
/// get a `"drop"` edge to a sentinel feature named `"dropped"` shared by
/// this application, so drops stay visible in the graph instead of being
/// silently discarded. The output list is exactly the kept subset, order
/// preserved.
pub fn apply_selector(mask: &[bool], inputs: &[FeatureRef]) -> Result<Vec<FeatureRef>> {
    if mask.len() != inputs.len() {
        return Err(FilamentError::ShapeMismatch {
            expected: inputs.len(),
            got: mask.len(),
        });
    }

    let mut outputs = Vec::new();
    let mut sentinel: Option<FeatureRef> = None;
    for (input, &keep) in inputs.iter().zip(mask) {
        if keep {
            let output = Feature::new(input.name());
            input.transform("select", output.clone());
            outputs.push(output);
        } else {
            let dropped = sentinel
                .get_or_insert_with(|| Feature::new("dropped"))
                .clone();
            input.transform("drop", dropped);
        }
    }
    Ok(outputs)
}

/// One-to-many shape: column *i* expands into `counts[i]` category
/// features named `"{input}_{j}"`, each linked by an edge labeled `label`.
///
/// The output list is the flattened concatenation across inputs, input
/// order then category order. A count of zero contributes nothing.
pub fn apply_expansion(
    label: &str,
    counts: &[usize],
    inputs: &[FeatureRef],
) -> Result<Vec<FeatureRef>> {
    if counts.len() != inputs.len() {
        return Err(FilamentError::ShapeMismatch {
            expected: inputs.len(),
            got: counts.len(),
        });
    }

    let mut outputs = Vec::new();
    for (input, &count) in inputs.iter().zip(counts) {
        for category in 0..count {
            let output = Feature::new(format!("{}_{}", input.name(), category));
            input.transform(label, output.clone());
            outputs.push(output);
        }
    }
    Ok(outputs)
}

/// Many-to-many shape: a dense projection onto `components` outputs, every
/// output depending on every input.
///
/// Output *i* is named `"{label}:{i}"` and every input gets one edge per
/// output carrying the component index, so the fan-in is visible in the
/// graph.
pub fn apply_projection(
    label: &str,
    components: usize,
    inputs: &[FeatureRef],
) -> Vec<FeatureRef> {
    let outputs: Vec<FeatureRef> = (0..components)
        .map(|i| Feature::new(format!("{label}:{i}")))
        .collect();
    for input in inputs {
        for (i, output) in outputs.iter().enumerate() {
            input.transform(format!("{label}:{i}"), output.clone());
        }
    }
    outputs
}
