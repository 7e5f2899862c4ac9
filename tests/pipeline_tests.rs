//! End-to-end lineage tests over realistic pipeline/union compositions
//! Exercises tracing, graph export, cycle checking, and layout together.

use filament::{
    children, detect_cycles, fall_layout, fall_layout_with, init_root, CategoricalEncoder,
    ColumnSelector, Estimator, FeatureUnion, FilamentError, LayoutConfig, LinearProjector,
    LineageGraph, OpaqueTransformer, Pipeline, Stage, Tracer,
};

// ============================================================================
// Full Composition
// ============================================================================

/// A union splitting categorical and numeric columns, feeding a reducer and
/// a terminal estimator: the shape of a typical feature-engineering
/// pipeline.
fn titanic_pipeline() -> Pipeline {
    let union = FeatureUnion::new()
        .branch(
            "categorical",
            vec![0],
            Stage::transform(CategoricalEncoder::new(vec![2])),
        )
        .branch(
            "numeric",
            vec![1, 2],
            Stage::Pipeline(
                Pipeline::new()
                    .step("impute", Stage::transform(OpaqueTransformer::new("imputer")))
                    .step(
                        "select",
                        Stage::transform(ColumnSelector::new(vec![true, false])),
                    ),
            ),
        );

    Pipeline::new()
        .step("features", Stage::Union(union))
        .step("reduce", Stage::transform(LinearProjector::new(2)))
        .step("fit", Stage::transform(Estimator::new("logistic")))
}

#[test]
fn test_full_composition_output_shape() {
    let root = init_root(&["sex", "age", "fare"]);
    let inputs = children(&root);

    let outputs = Tracer::new()
        .trace_pipeline(&titanic_pipeline(), &inputs)
        .unwrap();

    // Union yields sex_0, sex_1, age → projector yields 2 components; the
    // estimator tail does not extend lineage.
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].name(), "pca:0");
    assert_eq!(outputs[1].name(), "pca:1");
    for output in &outputs {
        assert_eq!(output.out_degree(), 0);
    }
}

#[test]
fn test_full_composition_graph_is_valid_dag() {
    let root = init_root(&["sex", "age", "fare"]);
    let inputs = children(&root);
    Tracer::new()
        .trace_pipeline(&titanic_pipeline(), &inputs)
        .unwrap();

    detect_cycles(&root).unwrap();

    let graph = LineageGraph::from_root(&root);
    // root + 3 raw + 2 onehot + 2 imputed + 1 selected "age"
    // + 1 drop sentinel + 2 components
    assert_eq!(graph.nodes.len(), 12);

    let labels = graph.node_labels();
    assert!(labels.values().any(|n| *n == "sex_0"));
    assert!(labels.values().any(|n| *n == "sex_1"));
    assert!(labels.values().any(|n| *n == "dropped"));
    assert!(labels.values().any(|n| *n == "pca:0"));
}

#[test]
fn test_full_composition_edge_labels() {
    let root = init_root(&["sex", "age", "fare"]);
    let inputs = children(&root);
    Tracer::new()
        .trace_pipeline(&titanic_pipeline(), &inputs)
        .unwrap();

    let graph = LineageGraph::from_root(&root);
    let labels: Vec<&str> = graph.edges.iter().map(|e| e.label.as_str()).collect();

    assert_eq!(labels.iter().filter(|l| **l == "init").count(), 3);
    assert_eq!(labels.iter().filter(|l| **l == "onehot").count(), 2);
    assert_eq!(labels.iter().filter(|l| **l == "imputer").count(), 2);
    assert_eq!(labels.iter().filter(|l| **l == "select").count(), 1);
    assert_eq!(labels.iter().filter(|l| **l == "drop").count(), 1);
    // Three union outputs each fan into two components.
    assert_eq!(labels.iter().filter(|l| **l == "pca:0").count(), 3);
    assert_eq!(labels.iter().filter(|l| **l == "pca:1").count(), 3);
}

#[test]
fn test_full_composition_layout() {
    let root = init_root(&["sex", "age", "fare"]);
    let inputs = children(&root);
    Tracer::new()
        .trace_pipeline(&titanic_pipeline(), &inputs)
        .unwrap();

    let graph = LineageGraph::from_root(&root);
    let layout = fall_layout(&root).unwrap();

    // Every exported node has a coordinate, and vice versa.
    assert_eq!(layout.len(), graph.nodes.len());
    for node in &graph.nodes {
        assert!(layout.contains_key(&node.id));
    }

    // Re-running yields identical coordinates.
    let layout2 = fall_layout(&root).unwrap();
    for (id, point) in &layout {
        assert_eq!(layout2[id], *point);
    }
}

#[test]
fn test_parallel_union_composition_matches_sequential() {
    let build = |parallel: bool| {
        let union = FeatureUnion::new()
            .branch("a", vec![0, 1], Stage::transform(CategoricalEncoder::new(vec![2, 3])))
            .branch("b", vec![2], Stage::transform(OpaqueTransformer::new("scaler")))
            .branch("c", vec![3], Stage::transform(ColumnSelector::new(vec![true])));
        if parallel {
            union.parallel()
        } else {
            union
        }
    };

    let seq_root = init_root(&["w", "x", "y", "z"]);
    let par_root = init_root(&["w", "x", "y", "z"]);

    let seq = Tracer::new()
        .trace_union(&build(false), &children(&seq_root))
        .unwrap();
    let par = Tracer::new()
        .trace_union(&build(true), &children(&par_root))
        .unwrap();

    let seq_names: Vec<&str> = seq.iter().map(|f| f.name()).collect();
    let par_names: Vec<&str> = par.iter().map(|f| f.name()).collect();
    assert_eq!(seq_names, par_names);
    assert_eq!(seq_names.len(), 2 + 3 + 1 + 1);
}

// ============================================================================
// Error Paths
// ============================================================================

#[test]
fn test_strict_tracer_surfaces_unsupported_shape() {
    let root = init_root(&["a"]);
    let pipeline = Pipeline::new().step(
        "mystery",
        Stage::transform(OpaqueTransformer::new("mystery")),
    );

    let err = Tracer::strict()
        .trace_pipeline(&pipeline, &children(&root))
        .unwrap_err();
    assert!(matches!(
        &err,
        FilamentError::UnsupportedTransformerShape(label) if label == "mystery"
    ));
    assert_eq!(err.error_code().category(), "Dispatch");
}

#[test]
fn test_union_bounds_error_names_branch() {
    let root = init_root(&["a", "b"]);
    let union = FeatureUnion::new().branch(
        "wide",
        vec![0, 1, 2],
        Stage::transform(ColumnSelector::identity(3)),
    );

    let err = Tracer::new()
        .trace_union(&union, &children(&root))
        .unwrap_err();
    match err {
        FilamentError::BranchIndexMismatch { branch, index, len } => {
            assert_eq!(branch, "wide");
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_cycle_error_aborts_before_coordinates() {
    use filament::Feature;

    let a = Feature::new("a");
    let b = Feature::new("b");
    a.transform("t", b.clone());
    b.transform("t", a.clone());

    let err = fall_layout(&a).unwrap_err();
    assert_eq!(err.error_code().code(), 1001);
}

// ============================================================================
// Renderer Contract
// ============================================================================

#[test]
fn test_snapshot_and_layout_serialize_to_json() {
    let root = init_root(&["a", "b"]);
    let inputs = children(&root);
    Tracer::new()
        .trace(&Stage::transform(LinearProjector::new(2)), &inputs)
        .unwrap();

    let graph = LineageGraph::from_root(&root);
    let layout = fall_layout_with(
        &root,
        &LayoutConfig {
            x_spacing: 2.0,
            y_spacing: 1.0,
        },
    )
    .unwrap();

    let graph_json = serde_json::to_string(&graph).unwrap();
    let layout_json = serde_json::to_string(&layout).unwrap();

    let graph_back: LineageGraph = serde_json::from_str(&graph_json).unwrap();
    assert_eq!(graph_back.nodes.len(), graph.nodes.len());
    assert_eq!(graph_back.edges.len(), graph.edges.len());

    let layout_back: std::collections::HashMap<filament::FeatureId, filament::Point2D> =
        serde_json::from_str(&layout_json).unwrap();
    assert_eq!(layout_back.len(), layout.len());
}

#[test]
fn test_shared_downstream_levels_once() {
    // Dense projection creates shared downstream nodes; each appears once
    // in the snapshot and once in the layout.
    let root = init_root(&["a", "b", "c"]);
    let inputs = children(&root);
    let outputs = Tracer::new()
        .trace(&Stage::transform(LinearProjector::new(2)), &inputs)
        .unwrap();

    let graph = LineageGraph::from_root(&root);
    let layout = fall_layout(&root).unwrap();

    for output in &outputs {
        let occurrences = graph.nodes.iter().filter(|n| n.id == output.id()).count();
        assert_eq!(occurrences, 1);
        // Components sit one level past the raw features.
        assert_eq!(layout[&output.id()].x, 2.0);
    }
}
