//! Layers using TensorFlow's `SAME`/`VALID` padding algorithms.
//!
//! See <https://www.tensorflow.org/api_docs/python/tf/nn#notes_on_padding_2>.

use super::{ceil_div, conv_analysis, pool_analysis};
use crate::{
    error::{AnalyzerErr, Result},
    options::Options,
    shape::{Kernel, Pad, PaddingMode, Shape, TfStride, Window},
    stats::Analysis,
    validate,
};

/// Output length of one axis:
/// `VALID` keeps only full windows, `SAME` covers every input position.
fn tf_extent(input: i64, filter: i64, stride: i64, mode: PaddingMode) -> Result<i64> {
    match mode {
        PaddingMode::Valid => {
            let span = input
                .checked_sub(filter)
                .and_then(|n| n.checked_add(1))
                .ok_or(AnalyzerErr::overflow("output shape"))?;
            ceil_div(span, stride)
        }
        PaddingMode::Same => ceil_div(input, stride),
    }
}

fn tf_output(
    input: Shape,
    window: Window,
    stride: TfStride,
    mode: PaddingMode,
    channels: i64,
) -> Result<Shape> {
    Ok(Shape::new(
        tf_extent(input.height, window.height, stride.height(), mode)?,
        tf_extent(input.width, window.width, stride.width(), mode)?,
        channels,
    ))
}

/// Derives the four-sided padding TensorFlow applies in `SAME` mode.
///
/// Each axis uses its own stride. When the total is odd the extra row or
/// column goes to the bottom or right.
///
/// # Arguments
/// * `input` - The volume fed into the layer.
/// * `window` - Spatial extent of the filter.
/// * `stride` - The layer's 4-component stride.
///
/// # Returns
/// The padding on every side, never negative.
///
/// # Errors
/// `Overflow` if the total padding of an axis does not fit in an `i64`.
pub fn same_padding(input: Shape, window: Window, stride: TfStride) -> Result<Pad> {
    let along = |input: i64, filter: i64, stride: i64| -> Result<i64> {
        let out = ceil_div(input, stride)?;
        (out - 1)
            .checked_mul(stride)
            .and_then(|n| n.checked_add(filter))
            .and_then(|n| n.checked_sub(input))
            .map(|n| n.max(0))
            .ok_or(AnalyzerErr::overflow("padding"))
    };

    let along_height = along(input.height, window.height, stride.height())?;
    let along_width = along(input.width, window.width, stride.width())?;

    Ok(Pad {
        top: along_height / 2,
        bottom: along_height - along_height / 2,
        left: along_width / 2,
        right: along_width - along_width / 2,
    })
}

fn derived_pad(input: Shape, window: Window, stride: TfStride, mode: PaddingMode) -> Result<Pad> {
    match mode {
        PaddingMode::Same => same_padding(input, window, stride),
        PaddingMode::Valid => Ok(Pad::default()),
    }
}

/// A convolution layer using TF padding semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfConv {
    kernel: Kernel,
    stride: TfStride,
    mode: PaddingMode,
}

impl TfConv {
    pub fn new(kernel: Kernel, stride: TfStride, mode: PaddingMode) -> Self {
        Self {
            kernel,
            stride,
            mode,
        }
    }

    pub fn output_shape(&self, input: Shape) -> Result<Shape> {
        tf_output(
            input,
            self.kernel.window(),
            self.stride,
            self.mode,
            self.kernel.out_channels,
        )
    }

    pub fn analyze(&self, input: Shape, options: &Options) -> Result<Analysis> {
        let mut analysis = conv_analysis(input, self.kernel, self.output_shape(input)?, options)?;
        analysis.pad = Some(derived_pad(
            input,
            self.kernel.window(),
            self.stride,
            self.mode,
        )?);
        Ok(analysis)
    }
}

/// A pooling layer using TF padding semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfPool {
    window: Window,
    stride: TfStride,
    mode: PaddingMode,
}

impl TfPool {
    pub fn new(window: Window, stride: TfStride, mode: PaddingMode) -> Self {
        Self {
            window,
            stride,
            mode,
        }
    }

    pub fn output_shape(&self, input: Shape) -> Result<Shape> {
        tf_output(input, self.window, self.stride, self.mode, input.channels)
    }

    pub fn analyze(&self, input: Shape) -> Result<Analysis> {
        let mut analysis = pool_analysis(self.output_shape(input)?)?;
        analysis.pad = Some(derived_pad(input, self.window, self.stride, self.mode)?);
        Ok(analysis)
    }
}

/// Analyzes a TF-style convolution layer from raw arguments.
///
/// # Arguments
/// * `input` - `[height, width]` or `[height, width, channel]`.
/// * `filter` - `[height, width, out_channel]`.
/// * `strides` - `[batch, height, width, channel]`.
/// * `padding` - `"SAME"` or `"VALID"`.
/// * `options` - Analysis options.
///
/// # Errors
/// `InvalidDimension` for malformed shapes, `InvalidPaddingMode` for an
/// unknown padding token, `Overflow` for counts beyond `i64`.
pub fn analyze_conv_tf(
    input: &[i64],
    filter: &[i64],
    strides: &[i64],
    padding: &str,
    options: &Options,
) -> Result<Analysis> {
    let input = validate::check_input(input)?;
    let kernel = validate::check_kernel(filter)?;
    let stride = validate::check_tf_stride(strides)?;
    let mode = validate::check_padding_mode(padding)?;

    TfConv::new(kernel, stride, mode).analyze(input, options)
}

/// Analyzes a TF-style pooling layer from raw arguments.
///
/// # Errors
/// `InvalidDimension` for malformed shapes, `InvalidPaddingMode` for an
/// unknown padding token.
pub fn analyze_pool_tf(
    input: &[i64],
    filter: &[i64],
    strides: &[i64],
    padding: &str,
) -> Result<Analysis> {
    let input = validate::check_input(input)?;
    let window = validate::check_window(filter)?;
    let stride = validate::check_tf_stride(strides)?;
    let mode = validate::check_padding_mode(padding)?;

    TfPool::new(window, stride, mode).analyze(input)
}
