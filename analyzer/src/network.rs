use log::{debug, warn};
use specs::LayerSpec;

use crate::{
    convention::Convention,
    error::{AnalyzerErr, Result},
    layers::Layer,
    options::Options,
    stats::{LayerKind, LayerStat, NetworkStat, Output},
    validate,
};

/// Analyzes an ordered list of layers.
///
/// Each layer is fed the previous layer's output, starting from `input`,
/// and its figures are added to the network totals. The first invalid layer
/// aborts the whole analysis.
///
/// # Arguments
/// * `layers` - The layer entries, in forward order.
/// * `input` - `[height, width]` or `[height, width, channel]`.
/// * `convention` - Padding semantics for every conv and pool layer.
/// * `options` - Analysis options.
///
/// # Returns
/// Per-layer statistics plus their sums. An empty list yields zero totals
/// and the input as output.
///
/// # Errors
/// `UnknownLayerType` for an unrecognized `type`, `Layer` wrapping the
/// validation or overflow failure of any other entry, `InvalidDimension`
/// for a bad `input`, `Overflow` if a network total leaves the `i64` range.
pub fn analyze_network(
    layers: &[LayerSpec],
    input: &[i64],
    convention: Convention,
    options: &Options,
) -> Result<NetworkStat> {
    let input = validate::check_input(input)?;
    let mut stat = NetworkStat::empty(input);

    for (index, spec) in layers.iter().enumerate() {
        let layer = analyze_layer(index, spec, &stat.output, convention, options)?;
        debug!(
            index = index,
            kind = layer.kind.as_str(),
            neurons = layer.neurons,
            weights = layer.weights;
            "{}: output {}", layer.name, layer.output
        );
        stat.push(layer)?;
    }

    Ok(stat)
}

fn analyze_layer(
    index: usize,
    spec: &LayerSpec,
    input: &Output,
    convention: Convention,
    options: &Options,
) -> Result<LayerStat> {
    let kind = LayerKind::parse(&spec.kind).ok_or_else(|| AnalyzerErr::UnknownLayerType {
        index,
        kind: spec.kind.clone(),
    })?;
    let name = spec
        .name
        .clone()
        .unwrap_or_else(|| format!("{kind}{}", index + 1));

    let in_layer = |e: AnalyzerErr| AnalyzerErr::Layer {
        index,
        name: name.clone(),
        source: Box::new(e),
    };

    let analysis = Layer::from_spec(kind, spec, convention)
        .and_then(|layer| layer.analyze(input, options))
        .map_err(in_layer)?;

    if matches!(analysis.output, Output::Shape(shape) if shape.is_degenerate()) {
        warn!(index = index; "{name}: degenerate output shape {}", analysis.output);
    }

    let memory = spec
        .datasize
        .filter(|&size| size > 0)
        .map(|size| {
            i64::try_from(size)
                .ok()
                .and_then(|size| size.checked_mul(analysis.neurons))
                .ok_or(AnalyzerErr::overflow("memory"))
        })
        .transpose()
        .map_err(in_layer)?;

    Ok(LayerStat {
        name,
        kind,
        output: analysis.output,
        neurons: analysis.neurons,
        weights: analysis.weights,
        reduced_weights: analysis.reduced_weights.unwrap_or(analysis.weights),
        connections_per_neuron: analysis.connections_per_neuron,
        memory,
        pad: analysis.pad,
        datasize: spec.datasize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    #[test]
    fn threads_outputs_through_layers() {
        let layers = [
            LayerSpec::conv([5, 5, 6], [1, 1], [2, 2]),
            LayerSpec::pool([2, 2], [2, 2]),
            LayerSpec::conv([5, 5, 16], [1, 1], [0, 0]),
            LayerSpec::pool([2, 2], [2, 2]),
            LayerSpec::fc(120),
            LayerSpec::fc(84),
            LayerSpec::fc(10),
        ];

        let stat =
            analyze_network(&layers, &[28, 28], Convention::Explicit, &Options::default()).unwrap();

        let outputs: Vec<Output> = stat.layers.iter().map(|l| l.output).collect();
        assert_eq!(
            outputs,
            vec![
                Shape::new(28, 28, 6).into(),
                Shape::new(14, 14, 6).into(),
                Shape::new(10, 10, 16).into(),
                Shape::new(5, 5, 16).into(),
                Output::Scalar(120),
                Output::Scalar(84),
                Output::Scalar(10),
            ]
        );
        assert_eq!(stat.output, Output::Scalar(10));
        assert_eq!(stat.layers[4].weights, 400 * 120);
    }

    #[test]
    fn default_names_count_from_one() {
        let layers = [
            LayerSpec::conv([3, 3, 4], [1, 1], [1, 1]),
            LayerSpec::pool([2, 2], [2, 2]).named("downsample"),
            LayerSpec::fc(10),
        ];
        let stat =
            analyze_network(&layers, &[8, 8, 1], Convention::Explicit, &Options::default()).unwrap();

        let names: Vec<&str> = stat.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["conv1", "downsample", "fc3"]);
    }

    #[test]
    fn reduced_weights_default_to_weights() {
        let layers = [
            LayerSpec::conv([3, 3, 4], [1, 1], [1, 1]),
            LayerSpec::pool([2, 2], [2, 2]),
            LayerSpec::fc(10),
        ];
        let stat =
            analyze_network(&layers, &[8, 8, 1], Convention::Explicit, &Options::default()).unwrap();

        assert_eq!(stat.layers[0].reduced_weights, 4 * 9 + 4);
        assert_eq!(stat.layers[1].reduced_weights, 0);
        assert_eq!(stat.layers[2].reduced_weights, 4 * 4 * 4 * 10);
    }

    #[test]
    fn memory_needs_a_positive_datasize() {
        let layers = [
            LayerSpec::conv([3, 3, 4], [1, 1], [1, 1]).with_datasize(4),
            LayerSpec::pool([2, 2], [2, 2]).with_datasize(0),
            LayerSpec::fc(10).with_datasize(2),
        ];
        let stat =
            analyze_network(&layers, &[8, 8, 1], Convention::Explicit, &Options::default()).unwrap();

        assert_eq!(stat.layers[0].memory, Some(4 * 8 * 8 * 4));
        assert_eq!(stat.layers[1].memory, None);
        assert_eq!(stat.layers[1].datasize, Some(0));
        assert_eq!(stat.layers[2].memory, Some(20));
        assert_eq!(stat.memory, 1024 + 20);
    }

    #[test]
    fn memory_beyond_the_integer_range_is_an_error() {
        let layers = [
            LayerSpec::fc(10),
            LayerSpec::fc(10).with_datasize(u64::MAX),
        ];
        let err = analyze_network(&layers, &[2, 2], Convention::Explicit, &Options::default())
            .unwrap_err();

        assert!(matches!(err, AnalyzerErr::Layer { index: 1, .. }));
        assert_eq!(err.root_cause(), &AnalyzerErr::Overflow("memory"));

        let layers = [LayerSpec::fc(10).with_datasize(i64::MAX as u64)];
        let err = analyze_network(&layers, &[2, 2], Convention::Explicit, &Options::default())
            .unwrap_err();
        assert_eq!(err.root_cause(), &AnalyzerErr::Overflow("memory"));
    }

    #[test]
    fn huge_layer_fails_instead_of_wrapping() {
        let layers = [LayerSpec::conv([1, 1, 4], [1, 1], [0, 0])];
        let err = analyze_network(
            &layers,
            &[3_000_000_000, 3_000_000_000, 3],
            Convention::Explicit,
            &Options::default(),
        )
        .unwrap_err();

        assert!(matches!(err, AnalyzerErr::Layer { index: 0, .. }));
        assert_eq!(err.root_cause(), &AnalyzerErr::Overflow("volume"));
    }

    #[test]
    fn unknown_type_names_index_and_type() {
        let layers = [
            LayerSpec::conv([3, 3, 4], [1, 1], [1, 1]),
            LayerSpec {
                kind: "dropout".into(),
                ..Default::default()
            },
            LayerSpec::fc(10),
        ];
        let err = analyze_network(&layers, &[8, 8], Convention::Explicit, &Options::default())
            .unwrap_err();

        assert_eq!(
            err,
            AnalyzerErr::UnknownLayerType {
                index: 1,
                kind: "dropout".into()
            }
        );
    }

    #[test]
    fn invalid_layer_aborts_with_context() {
        let layers = [
            LayerSpec::fc(10),
            LayerSpec::pool([2, 2], [2, 2]),
        ];
        let err = analyze_network(&layers, &[8, 8], Convention::Explicit, &Options::default())
            .unwrap_err();

        match &err {
            AnalyzerErr::Layer { index, name, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(name, "pool2");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(
            err.root_cause(),
            AnalyzerErr::InvalidDimension { arg: "input", .. }
        ));
    }

    #[test]
    fn empty_network_returns_its_input() {
        let stat = analyze_network(&[], &[4, 4], Convention::Explicit, &Options::default()).unwrap();
        assert!(stat.layers.is_empty());
        assert_eq!(stat.output, Shape::new(4, 4, 1).into());
        assert_eq!(stat.weights, 0);
    }

    #[test]
    fn bad_input_is_rejected_before_any_layer() {
        let err = analyze_network(
            &[LayerSpec::fc(10)],
            &[1, 2, 3, 4],
            Convention::Explicit,
            &Options::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyzerErr::InvalidDimension { arg: "input", .. }));
    }
}
