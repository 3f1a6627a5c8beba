mod conv;
mod dense;
pub(crate) mod fields;
mod layer;
mod pool;
mod tf;

pub use conv::{Conv, analyze_conv};
pub use dense::{Dense, analyze_fc};
pub use layer::Layer;
pub use pool::{Pool, analyze_pool};
pub use tf::{TfConv, TfPool, analyze_conv_tf, analyze_pool_tf, same_padding};

use crate::{
    error::{AnalyzerErr, Result},
    options::Options,
    shape::{Kernel, Shape},
    stats::Analysis,
};

/// Output length of one axis under explicit symmetric padding:
/// `floor((input - filter + 2 * pad) / stride) + 1`.
///
/// The result is not clamped, a filter larger than the padded input yields
/// zero or a negative length.
fn padded_extent(input: i64, filter: i64, pad: i64, stride: i64) -> Result<i64> {
    pad.checked_mul(2)
        .and_then(|pad| input.checked_sub(filter)?.checked_add(pad))
        .and_then(|span| span.div_euclid(stride).checked_add(1))
        .ok_or(AnalyzerErr::overflow("output shape"))
}

/// `ceil(a / b)` for a positive `b`.
fn ceil_div(a: i64, b: i64) -> Result<i64> {
    a.checked_neg()
        .map(|a| -a.div_euclid(b))
        .ok_or(AnalyzerErr::overflow("output shape"))
}

/// Parameter accounting shared by both convolution flavours.
fn conv_analysis(
    input: Shape,
    kernel: Kernel,
    output: Shape,
    options: &Options,
) -> Result<Analysis> {
    let taps = kernel
        .height
        .checked_mul(kernel.width)
        .and_then(|n| n.checked_mul(input.channels))
        .ok_or(AnalyzerErr::overflow("connections per neuron"))?;
    let bias = if options.no_bias { 0 } else { 1 };

    let connections_per_neuron = taps
        .checked_add(bias)
        .ok_or(AnalyzerErr::overflow("connections per neuron"))?;
    let reduced_weights = kernel
        .out_channels
        .checked_mul(connections_per_neuron)
        .ok_or(AnalyzerErr::overflow("reduced weights"))?;

    let neurons = output.volume()?;
    let weights = neurons
        .checked_mul(connections_per_neuron)
        .ok_or(AnalyzerErr::overflow("weights"))?;

    Ok(Analysis {
        output: output.into(),
        neurons,
        weights,
        reduced_weights: Some(reduced_weights),
        connections_per_neuron,
        pad: None,
    })
}

/// Pooling layers carry the volume through and learn nothing.
fn pool_analysis(output: Shape) -> Result<Analysis> {
    Ok(Analysis {
        output: output.into(),
        neurons: output.volume()?,
        weights: 0,
        reduced_weights: None,
        connections_per_neuron: 0,
        pad: None,
    })
}
