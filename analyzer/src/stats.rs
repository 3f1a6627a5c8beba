use std::fmt;

use serde::Serialize;

use crate::{
    error::{AnalyzerErr, Result},
    shape::{Pad, Shape},
};

/// What a layer hands to the next one.
///
/// Convolution and pooling produce a volume, a dense layer produces a flat
/// neuron count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Shape(Shape),
    Scalar(i64),
}

impl Output {
    /// Total number of elements.
    ///
    /// # Errors
    /// `Overflow` if a volume does not fit in an `i64`.
    pub fn size(&self) -> Result<i64> {
        match self {
            Output::Shape(shape) => shape.volume(),
            Output::Scalar(n) => Ok(*n),
        }
    }

    /// Returns the volume, for layers that need spatial axes.
    ///
    /// # Errors
    /// `InvalidDimension` if this is the flat output of a dense layer.
    pub fn shape(&self) -> Result<Shape> {
        match self {
            Output::Shape(shape) => Ok(*shape),
            Output::Scalar(n) => Err(AnalyzerErr::dimension(
                "input",
                format!("expected a [height, width, channel] shape, got the flat size {n}"),
            )),
        }
    }
}

impl From<Shape> for Output {
    fn from(value: Shape) -> Self {
        Output::Shape(value)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Shape(shape) => write!(f, "{shape}"),
            Output::Scalar(n) => write!(f, "{n}"),
        }
    }
}

/// The recognized layer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Conv,
    Pool,
    Fc,
}

impl LayerKind {
    /// Reads the `type` field of a layer entry.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "conv" => Some(LayerKind::Conv),
            "pool" => Some(LayerKind::Pool),
            "fc" => Some(LayerKind::Fc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Conv => "conv",
            LayerKind::Pool => "pool",
            LayerKind::Fc => "fc",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing one layer in isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub output: Output,
    pub neurons: i64,
    /// Learnable scalars, counting one bias per output neuron.
    pub weights: i64,
    /// Learnable scalars with one bias per output channel. Only layers that
    /// share parameters across positions report it.
    pub reduced_weights: Option<i64>,
    pub connections_per_neuron: i64,
    /// Derived four-sided padding of a TF-style `SAME` layer.
    pub pad: Option<Pad>,
}

/// Statistics of one layer inside a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStat {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub output: Output,
    pub neurons: i64,
    pub weights: i64,
    pub reduced_weights: i64,
    pub connections_per_neuron: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad: Option<Pad>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasize: Option<u64>,
}

/// Statistics of a whole network, summed over its layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStat {
    pub layers: Vec<LayerStat>,
    pub neurons: i64,
    pub weights: i64,
    pub reduced_weights: i64,
    pub memory: i64,
    pub output: Output,
}

impl NetworkStat {
    pub(crate) fn empty(input: Shape) -> Self {
        Self {
            layers: Vec::new(),
            neurons: 0,
            weights: 0,
            reduced_weights: 0,
            memory: 0,
            output: Output::Shape(input),
        }
    }

    /// Folds one more layer into the totals.
    ///
    /// # Errors
    /// `Overflow` if a running total leaves the `i64` range. The totals are
    /// left untouched in that case.
    pub(crate) fn push(&mut self, layer: LayerStat) -> Result<()> {
        let sum = |total: i64, n: i64, quantity| {
            total.checked_add(n).ok_or(AnalyzerErr::overflow(quantity))
        };
        let neurons = sum(self.neurons, layer.neurons, "total neurons")?;
        let weights = sum(self.weights, layer.weights, "total weights")?;
        let reduced_weights = sum(
            self.reduced_weights,
            layer.reduced_weights,
            "total reduced weights",
        )?;
        let memory = sum(self.memory, layer.memory.unwrap_or(0), "total memory")?;

        self.neurons = neurons;
        self.weights = weights;
        self.reduced_weights = reduced_weights;
        self.memory = memory;
        self.output = layer.output;
        self.layers.push(layer);
        Ok(())
    }
}
