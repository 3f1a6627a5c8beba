use specs::{LayerSpec, OptionsSpec};

use crate::{
    error::Result,
    layers::{Conv, Layer, Pool, TfConv, TfPool, fields},
    validate,
};

/// Padding semantics used for every conv and pool layer of a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Convention {
    /// Explicit `[height, width]` padding and `[height, width]` strides.
    #[default]
    Explicit,
    /// `SAME`/`VALID` padding and `[batch, height, width, channel]` strides.
    TensorFlow,
}

impl Convention {
    /// Maps the document's `tensorflow` switch onto a convention.
    pub fn from_flag(tensorflow: bool) -> Self {
        if tensorflow {
            Convention::TensorFlow
        } else {
            Convention::Explicit
        }
    }

    /// Builds a convolution layer out of a layer entry.
    ///
    /// # Errors
    /// `InvalidDimension` or `InvalidPaddingMode` for malformed fields.
    pub fn conv(&self, spec: &LayerSpec) -> Result<Layer> {
        let kernel = validate::check_kernel(fields::filter(spec)?)?;

        let layer = match self {
            Convention::Explicit => {
                let stride = validate::check_stride(fields::strides(spec)?)?;
                let padding = fields::explicit_padding(spec)?;
                Layer::Conv(Conv::new(kernel, stride, padding))
            }
            Convention::TensorFlow => {
                let stride = validate::check_tf_stride(fields::strides(spec)?)?;
                let mode = fields::padding_mode(spec)?;
                Layer::TfConv(TfConv::new(kernel, stride, mode))
            }
        };
        Ok(layer)
    }

    /// Builds a pooling layer out of a layer entry.
    ///
    /// # Errors
    /// `InvalidDimension` or `InvalidPaddingMode` for malformed fields.
    pub fn pool(&self, spec: &LayerSpec) -> Result<Layer> {
        let window = validate::check_window(fields::filter(spec)?)?;

        let layer = match self {
            Convention::Explicit => {
                let stride = validate::check_stride(fields::strides(spec)?)?;
                let padding = fields::explicit_padding(spec)?;
                Layer::Pool(Pool::new(window, stride, padding))
            }
            Convention::TensorFlow => {
                let stride = validate::check_tf_stride(fields::strides(spec)?)?;
                let mode = fields::padding_mode(spec)?;
                Layer::TfPool(TfPool::new(window, stride, mode))
            }
        };
        Ok(layer)
    }
}

impl From<&OptionsSpec> for Convention {
    fn from(value: &OptionsSpec) -> Self {
        Self::from_flag(value.tensorflow)
    }
}
