use super::{padded_extent, pool_analysis};
use crate::{
    error::Result,
    shape::{Padding, Shape, Stride, Window},
    stats::Analysis,
    validate,
};

/// A pooling layer with explicit symmetric padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pool {
    window: Window,
    stride: Stride,
    padding: Padding,
}

impl Pool {
    pub fn new(window: Window, stride: Stride, padding: Padding) -> Self {
        Self {
            window,
            stride,
            padding,
        }
    }

    /// Same per-axis arithmetic as a convolution, channels pass through.
    pub fn output_shape(&self, input: Shape) -> Result<Shape> {
        Ok(Shape::new(
            padded_extent(
                input.height,
                self.window.height,
                self.padding.height,
                self.stride.height,
            )?,
            padded_extent(
                input.width,
                self.window.width,
                self.padding.width,
                self.stride.width,
            )?,
            input.channels,
        ))
    }

    pub fn analyze(&self, input: Shape) -> Result<Analysis> {
        pool_analysis(self.output_shape(input)?)
    }
}

/// Analyzes a pooling layer from raw arguments.
///
/// # Arguments
/// * `input` - `[height, width]` or `[height, width, channel]`.
/// * `filter` - `[height, width]`.
/// * `strides` - `[height, width]`.
/// * `padding` - `[height, width]`, no padding when absent.
///
/// # Errors
/// `InvalidDimension` if any argument is malformed, `Overflow` if a size
/// does not fit in an `i64`.
pub fn analyze_pool(
    input: &[i64],
    filter: &[i64],
    strides: &[i64],
    padding: Option<&[i64]>,
) -> Result<Analysis> {
    let input = validate::check_input(input)?;
    let window = validate::check_window(filter)?;
    let stride = validate::check_stride(strides)?;
    let padding = padding
        .map(validate::check_padding)
        .transpose()?
        .unwrap_or_default();

    Pool::new(window, stride, padding).analyze(input)
}
