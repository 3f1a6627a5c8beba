use std::fmt;

use serde::Serialize;

use crate::error::{AnalyzerErr, Result};

/// A `(height, width, channels)` volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "[i64; 3]")]
pub struct Shape {
    pub height: i64,
    pub width: i64,
    pub channels: i64,
}

impl Shape {
    pub const fn new(height: i64, width: i64, channels: i64) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    /// Number of elements in the volume.
    ///
    /// # Errors
    /// `Overflow` if the product does not fit in an `i64`.
    pub fn volume(&self) -> Result<i64> {
        self.height
            .checked_mul(self.width)
            .and_then(|n| n.checked_mul(self.channels))
            .ok_or(AnalyzerErr::overflow("volume"))
    }

    /// Whether any axis collapsed to zero or below.
    pub fn is_degenerate(&self) -> bool {
        self.height <= 0 || self.width <= 0 || self.channels <= 0
    }
}

impl From<Shape> for [i64; 3] {
    fn from(value: Shape) -> Self {
        [value.height, value.width, value.channels]
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.height, self.width, self.channels)
    }
}

/// A convolution filter: spatial extent plus the number of output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    pub height: i64,
    pub width: i64,
    pub out_channels: i64,
}

impl Kernel {
    /// The spatial part of the filter.
    pub fn window(&self) -> Window {
        Window {
            height: self.height,
            width: self.width,
        }
    }
}

/// A pooling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub height: i64,
    pub width: i64,
}

/// Height and width steps of an explicit-padding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride {
    pub height: i64,
    pub width: i64,
}

/// A TF-style `[batch, height, width, channel]` stride.
///
/// Only the height and width entries take part in the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfStride(pub [i64; 4]);

impl TfStride {
    pub fn height(&self) -> i64 {
        self.0[1]
    }

    pub fn width(&self) -> i64 {
        self.0[2]
    }
}

/// Symmetric padding added to both sides of each spatial axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub height: i64,
    pub width: i64,
}

/// TF-style padding algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaddingMode {
    Same,
    Valid,
}

impl fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingMode::Same => write!(f, "SAME"),
            PaddingMode::Valid => write!(f, "VALID"),
        }
    }
}

/// Four-sided padding derived for `SAME` mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pad {
    pub top: i64,
    pub bottom: i64,
    pub left: i64,
    pub right: i64,
}
