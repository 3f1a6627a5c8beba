use specs::LayerSpec;

use super::{Conv, Dense, Pool, TfConv, TfPool, fields};
use crate::{
    convention::Convention,
    error::Result,
    options::Options,
    stats::{Analysis, LayerKind, Output},
};

/// A validated layer, ready to be analyzed against an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Conv(Conv),
    Pool(Pool),
    TfConv(TfConv),
    TfPool(TfPool),
    Dense(Dense),
}
use Layer::*;

impl Layer {
    /// Builds a layer of the given kind out of a layer entry.
    ///
    /// # Arguments
    /// * `kind` - The entry's parsed type.
    /// * `spec` - The entry itself.
    /// * `convention` - Which padding semantics conv and pool layers use.
    ///
    /// # Errors
    /// Any validation failure of the entry's fields.
    pub fn from_spec(kind: LayerKind, spec: &LayerSpec, convention: Convention) -> Result<Self> {
        match kind {
            LayerKind::Conv => convention.conv(spec),
            LayerKind::Pool => convention.pool(spec),
            LayerKind::Fc => Ok(Dense(super::Dense::new(fields::hidden(spec)?)?)),
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            Conv(_) | TfConv(_) => LayerKind::Conv,
            Pool(_) | TfPool(_) => LayerKind::Pool,
            Dense(_) => LayerKind::Fc,
        }
    }

    /// Analyzes this layer against the previous layer's output.
    ///
    /// # Errors
    /// `InvalidDimension` if a conv or pool layer is fed a flat input,
    /// `Overflow` if a count does not fit in an `i64`.
    pub fn analyze(&self, input: &Output, options: &Options) -> Result<Analysis> {
        match self {
            Conv(l) => l.analyze(input.shape()?, options),
            Pool(l) => l.analyze(input.shape()?),
            TfConv(l) => l.analyze(input.shape()?, options),
            TfPool(l) => l.analyze(input.shape()?),
            Dense(l) => l.analyze(input),
        }
    }
}
