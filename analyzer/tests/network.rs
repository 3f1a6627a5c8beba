use std::path::PathBuf;

use analyzer::{AnalyzerErr, Convention, LayerKind, Options, Output, Shape, analyze_network};
use specs::{LayerSpec, PaddingSpec, load_network, parse_network};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn vgg16() -> Vec<LayerSpec> {
    load_network(fixture("vgg16.json")).unwrap().layers
}

#[test]
fn vgg16_reduced_weights_without_bias() {
    let expected = [
        1728, 36864, 0, 73728, 147456, 0, 294912, 589824, 589824, 0, 1179648, 2359296, 2359296,
        0, 2359296, 2359296, 2359296, 0, 102760448, 16777216, 4096000,
    ];

    let stat = analyze_network(
        &vgg16(),
        &[224, 224, 3],
        Convention::Explicit,
        &Options { no_bias: true },
    )
    .unwrap();

    let reduced: Vec<i64> = stat.layers.iter().map(|l| l.reduced_weights).collect();
    assert_eq!(reduced, expected);
    assert_eq!(stat.reduced_weights, expected.iter().sum::<i64>());
    assert_eq!(stat.output, Output::Scalar(1000));
}

#[test]
fn vgg16_shapes_halve_at_every_pool() {
    let stat = analyze_network(&vgg16(), &[224, 224, 3], Convention::Explicit, &Options::default())
        .unwrap();

    let pools: Vec<Output> = stat
        .layers
        .iter()
        .filter(|l| l.kind == LayerKind::Pool)
        .map(|l| l.output)
        .collect();
    assert_eq!(
        pools,
        vec![
            Shape::new(112, 112, 64).into(),
            Shape::new(56, 56, 128).into(),
            Shape::new(28, 28, 256).into(),
            Shape::new(14, 14, 512).into(),
            Shape::new(7, 7, 512).into(),
        ]
    );
}

#[test]
fn totals_are_sums_of_layers() {
    let stat = analyze_network(&vgg16(), &[224, 224, 3], Convention::Explicit, &Options::default())
        .unwrap();

    assert_eq!(stat.neurons, stat.layers.iter().map(|l| l.neurons).sum::<i64>());
    assert_eq!(stat.weights, stat.layers.iter().map(|l| l.weights).sum::<i64>());
    assert_eq!(
        stat.reduced_weights,
        stat.layers.iter().map(|l| l.reduced_weights).sum::<i64>()
    );
    assert_eq!(
        stat.memory,
        stat.layers.iter().filter_map(|l| l.memory).sum::<i64>()
    );
    assert_eq!(stat.memory, stat.neurons * 4);
}

#[test]
fn analysis_is_repeatable() {
    let layers = vgg16();
    let a = analyze_network(&layers, &[224, 224, 3], Convention::Explicit, &Options::default())
        .unwrap();
    let b = analyze_network(&layers, &[224, 224, 3], Convention::Explicit, &Options::default())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn tensorflow_convention_from_document() {
    let spec = parse_network(
        r#"{
            "input": [28, 28],
            "options": {"tensorflow": true},
            "layers": [
                {"type": "conv", "filter": [5, 5, 32], "strides": [1, 1, 1, 1], "padding": "SAME"},
                {"type": "pool", "filter": [2, 2], "strides": [1, 2, 2, 1], "padding": "SAME"},
                {"type": "conv", "filter": [5, 5, 64], "strides": [1, 1, 1, 1], "padding": "SAME"},
                {"type": "pool", "filter": [2, 2], "strides": [1, 2, 2, 1], "padding": "SAME"},
                {"type": "fc", "hidden": 1024},
                {"type": "fc", "hidden": 10}
            ]
        }"#,
    )
    .unwrap();

    let stat = analyze_network(
        &spec.layers,
        spec.input.as_deref().unwrap(),
        Convention::from(&spec.options),
        &Options::from(&spec.options),
    )
    .unwrap();

    assert_eq!(stat.layers[0].output, Shape::new(28, 28, 32).into());
    assert_eq!(stat.layers[1].output, Shape::new(14, 14, 32).into());
    assert_eq!(stat.layers[3].output, Shape::new(7, 7, 64).into());
    assert_eq!(stat.layers[4].weights, 7 * 7 * 64 * 1024);
    assert!(stat.layers[1].pad.is_some());
    assert!(stat.layers[4].pad.is_none());
}

#[test]
fn explicit_document_rejected_under_tensorflow_convention() {
    let layers = [LayerSpec::conv([3, 3, 8], [1, 1], [0, 0])];
    let err = analyze_network(&layers, &[7, 7, 3], Convention::TensorFlow, &Options::default())
        .unwrap_err();

    assert!(matches!(err, AnalyzerErr::Layer { index: 0, .. }));
    assert!(matches!(
        err.root_cause(),
        AnalyzerErr::InvalidDimension { arg: "strides", .. }
    ));
}

#[test]
fn bad_padding_token_surfaces_as_padding_mode_error() {
    let layers = [LayerSpec {
        kind: "pool".into(),
        filter: Some(vec![2, 2]),
        strides: Some(vec![1, 2, 2, 1]),
        padding: Some(PaddingSpec::Mode("same".into())),
        ..Default::default()
    }];
    let err = analyze_network(&layers, &[4, 4], Convention::TensorFlow, &Options::default())
        .unwrap_err();
    assert!(matches!(err.root_cause(), AnalyzerErr::InvalidPaddingMode(_)));
    assert!(err.to_string().contains("pool1"));
}

#[test]
fn network_stat_serializes_with_camel_case_fields() {
    let layers = [LayerSpec::pool([2, 2], [2, 2]).with_datasize(4)];
    let stat =
        analyze_network(&layers, &[4, 4, 1], Convention::Explicit, &Options::default()).unwrap();

    let json = serde_json::to_value(&stat).unwrap();
    assert_eq!(json["reducedWeights"], 0);
    assert_eq!(json["layers"][0]["type"], "pool");
    assert_eq!(json["layers"][0]["output"], serde_json::json!([2, 2, 1]));
    assert_eq!(json["layers"][0]["memory"], 16);
    assert_eq!(json["output"], serde_json::json!([2, 2, 1]));
}
