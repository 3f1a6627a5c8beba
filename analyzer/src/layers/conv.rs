use super::{conv_analysis, padded_extent};
use crate::{
    error::Result,
    options::Options,
    shape::{Kernel, Padding, Shape, Stride},
    stats::Analysis,
    validate,
};

/// A convolution layer with explicit symmetric padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conv {
    kernel: Kernel,
    stride: Stride,
    padding: Padding,
}

impl Conv {
    pub fn new(kernel: Kernel, stride: Stride, padding: Padding) -> Self {
        Self {
            kernel,
            stride,
            padding,
        }
    }

    /// Returns the output volume for the given input volume.
    ///
    /// # Arguments
    /// * `input` - The volume fed into this layer.
    ///
    /// # Returns
    /// The spatial axes shrink according to filter, stride and padding,
    /// the channels become the filter's output channels.
    ///
    /// # Errors
    /// `Overflow` if an axis does not fit in an `i64`.
    pub fn output_shape(&self, input: Shape) -> Result<Shape> {
        Ok(Shape::new(
            padded_extent(
                input.height,
                self.kernel.height,
                self.padding.height,
                self.stride.height,
            )?,
            padded_extent(
                input.width,
                self.kernel.width,
                self.padding.width,
                self.stride.width,
            )?,
            self.kernel.out_channels,
        ))
    }

    pub fn analyze(&self, input: Shape, options: &Options) -> Result<Analysis> {
        conv_analysis(input, self.kernel, self.output_shape(input)?, options)
    }
}

/// Analyzes a convolution layer from raw arguments.
///
/// # Arguments
/// * `input` - `[height, width]` or `[height, width, channel]`.
/// * `filter` - `[height, width, out_channel]`.
/// * `strides` - `[height, width]`.
/// * `padding` - `[height, width]`, no padding when absent.
/// * `options` - Analysis options.
///
/// # Errors
/// `InvalidDimension` if any argument is malformed, `Overflow` if a count
/// does not fit in an `i64`.
pub fn analyze_conv(
    input: &[i64],
    filter: &[i64],
    strides: &[i64],
    padding: Option<&[i64]>,
    options: &Options,
) -> Result<Analysis> {
    let input = validate::check_input(input)?;
    let kernel = validate::check_kernel(filter)?;
    let stride = validate::check_stride(strides)?;
    let padding = padding
        .map(validate::check_padding)
        .transpose()?
        .unwrap_or_default();

    Conv::new(kernel, stride, padding).analyze(input, options)
}
